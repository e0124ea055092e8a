//! Front-end and API check in one test

use tracing::info;

use crate::browser::{BrowserDriver, HomePageCheck};
use crate::error::E2eResult;
use crate::reqres::ReqresChecks;

/// Landing-page header through the browser, then the page-two user list
/// through the API. Stops at the first failure.
pub async fn front_end_and_api(
    driver: &mut dyn BrowserDriver,
    home: &HomePageCheck,
    reqres: &ReqresChecks,
) -> E2eResult<()> {
    home.verify(driver).await?;
    let page = reqres.list_users_page_two().await?;
    info!("Front end and API agree ({} users on page {})", page.data.len(), page.page);
    Ok(())
}
