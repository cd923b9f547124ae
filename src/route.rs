use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Client-side routes the views navigate to.
#[derive(AsRefStr, EnumString, EnumIter, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    #[strum(serialize = "/")]
    Home,
    #[strum(serialize = "/community")]
    Community,
    #[strum(serialize = "/create-fetus")]
    CreateFetus,
    #[strum(serialize = "/package-list")]
    PackageList,
    #[strum(serialize = "/booking")]
    Booking,
    #[strum(serialize = "/profile")]
    Profile,
    #[strum(serialize = "/view-fetus-health")]
    ViewFetusHealth,
    #[strum(serialize = "/manage-pregnancy")]
    ManagePregnancy,
    #[strum(serialize = "/manage-preg")]
    ManagePreg,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/register")]
    Register,
}

impl Route {
    pub fn path(self) -> &'static str {
        self.into()
    }
}
