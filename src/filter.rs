use std::{fmt, ops::AddAssign};

use crate::{model::Post, tag::TagId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    TagEquals(TagId),
    /// Case-insensitive substring of the title or the content. The needle is
    /// stored lowercased.
    TextContains(String),
}

impl Condition {
    pub fn text(needle: &str) -> Self {
        Self::TextContains(needle.to_lowercase())
    }

    pub fn satisfies(&self, post: &Post) -> bool {
        match self {
            Condition::TagEquals(id) => post.tag_id == Some(*id),
            Condition::TextContains(needle) => {
                needle.is_empty()
                    || post.title.to_lowercase().contains(needle.as_str())
                    || post.content.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Atom(Condition),
    Ands(Vec<Filter>),
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(Condition::TagEquals(id)) => write!(f, "tag={id}"),
            Self::Atom(Condition::TextContains(needle)) => write!(f, "text%{needle:?}"),
            Self::Ands(conds) => {
                if conds.is_empty() {
                    write!(f, "*")
                } else {
                    write!(f, "({}", conds[0])?;
                    for cond in &conds[1..] {
                        write!(f, " {}", cond)?;
                    }
                    write!(f, ")")
                }
            }
        }
    }
}

impl Filter {
    pub fn all() -> Self {
        Self::Ands(Vec::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::Ands(conds) if conds.is_empty())
    }

    pub fn tag(id: TagId) -> Self {
        Self::Atom(Condition::TagEquals(id))
    }

    /// Matches everything when `needle` is empty.
    pub fn text(needle: &str) -> Self {
        if needle.is_empty() {
            Self::all()
        } else {
            Self::Atom(Condition::text(needle))
        }
    }

    /// The filter behind a tag selector and a search box: both must hold.
    pub fn for_controls(selected_tag: Option<TagId>, search: &str) -> Self {
        let mut filter = Self::all();
        if let Some(id) = selected_tag {
            filter += Self::tag(id);
        }
        filter += Self::text(search);
        filter
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::Atom(cond) => cond.satisfies(post),
            Self::Ands(conds) => conds.iter().all(|it| it.matches(post)),
        }
    }
}

impl AddAssign<Filter> for Filter {
    fn add_assign(&mut self, rhs: Filter) {
        if self.is_all() {
            *self = rhs;
            return;
        }
        if rhs.is_all() {
            return;
        }

        if let Self::Ands(conds) = self {
            if let Self::Ands(rhs_conds) = rhs {
                conds.extend(rhs_conds);
            } else {
                conds.push(rhs);
            }
            return;
        }

        let lhs = std::mem::take(self);
        *self = Filter::Ands(vec![lhs, rhs]);
    }
}
