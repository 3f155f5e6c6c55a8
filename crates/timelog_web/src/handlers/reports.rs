use super::{render, PageResult};
use crate::pages;

pub(crate) async fn menu() -> PageResult {
    render(pages::reports::menu_page())
}
