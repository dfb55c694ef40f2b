pub(crate) const HELP_FLAG: &str = "--help";
pub(crate) const HELP_REQUESTED: &str = "Help requested";
pub(crate) const USAGE_PREFIX: &str = "Usage:";
pub(crate) const OPTIONS_HEADER: &str = "Options:";

pub(crate) const DEFAULT_SCREEN_WIDTH: usize = 80;
pub(crate) const DEFAULT_TAB_WIDTH: usize = 8;
pub(crate) const DEFAULT_BREAK_CHARS: [char; 5] = [' ', ',', ';', '!', '?'];
