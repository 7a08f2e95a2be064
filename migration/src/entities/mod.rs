pub mod history_link;
pub mod template;

pub use history_link::Entity as HistoryLinkEntity;
pub use template::Entity as TemplateEntity;
