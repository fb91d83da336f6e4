//! Custom widget components

mod command_bar;
mod detail_panel;
mod footer;
mod header;
mod topic_table;

pub use command_bar::CommandBar;
pub use detail_panel::DetailPanel;
pub use footer::Footer;
pub use header::MainHeader;
pub use topic_table::TopicTableView;
