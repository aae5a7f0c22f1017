pub(crate) const HELP_TOKEN: &str = "-help";
pub(crate) const ESCAPE_TOKEN: &str = "--";
pub(crate) const VERBATIM_TOKEN: &str = "---";
pub(crate) const GROUP_SEPARATOR: &str = ".";
pub(crate) const USAGE_HEADER: &str = "Usage:";
pub(crate) const SUMMARY_HEADER: &str = "Specified options:";
pub(crate) const LINE_INDENT: usize = 3;
