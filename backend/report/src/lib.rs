pub mod html;
pub mod text;
pub mod view;

pub use html::render_report_html;
pub use text::render_report_text;
pub use view::{view_model, ViewModel};
