pub mod install_info;
pub mod units;

pub use install_info::{INSTALL_PACKAGE_TYPE, INSTALL_UPDATE_METHOD, InstallInfo, InstallMethod};
pub use units::{Channel, ParseSubcomponentError, Subcomponent};
