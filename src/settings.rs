//! The settings page for entering external API credentials.
//!
//! Saving is currently simulated: the handler accepts the form, pauses as
//! if persisting, and reports success without storing the tokens anywhere.
//! The accounts table is where they will eventually land.

use std::time::Duration;

use axum::{
    Form,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// How long the save handler pretends to take.
const SIMULATED_SAVE_DELAY: Duration = Duration::from_millis(1000);

/// The data from the settings form.
#[derive(Debug, Deserialize)]
pub struct SettingsFormData {
    /// The Wise API token, if the user entered one.
    #[serde(default)]
    pub wise_api_token: String,
    /// The Gmail OAuth access token, if the user entered one.
    #[serde(default)]
    pub gmail_access_token: String,
}

/// Display the settings page.
pub async fn get_settings_page() -> Response {
    settings_view(false)
}

/// Handle the settings form submission.
///
/// The submitted tokens are dropped without being logged or stored. The
/// delay stands in for the persistence that does not exist yet.
pub async fn save_settings_endpoint(Form(_form_data): Form<SettingsFormData>) -> Response {
    tokio::time::sleep(SIMULATED_SAVE_DELAY).await;

    settings_view(true)
}

fn settings_view(saved: bool) -> Response {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW);

    let content = html! {
        (nav_bar.into_html())

        main class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full"
            {
                h1 class="text-2xl font-bold mb-6" { "Settings" }

                @if saved {
                    div
                        class="mb-4 rounded border border-green-300 bg-green-50 p-4 text-sm
                        text-green-800 dark:border-green-800 dark:bg-gray-800 dark:text-green-400"
                        role="alert"
                    {
                        "Settings saved successfully."
                    }
                }

                form method="post" action=(endpoints::SETTINGS_API) class="flex flex-col gap-4"
                {
                    div
                    {
                        label for="wise_api_token" class=(FORM_LABEL_STYLE)
                        {
                            "Wise API Token"
                        }

                        input
                            type="password"
                            name="wise_api_token"
                            id="wise_api_token"
                            placeholder="Enter your Wise API token"
                            class=(FORM_TEXT_INPUT_STYLE)
                            value="";
                    }

                    div
                    {
                        label for="gmail_access_token" class=(FORM_LABEL_STYLE)
                        {
                            "Gmail Access Token"
                        }

                        input
                            type="password"
                            name="gmail_access_token"
                            id="gmail_access_token"
                            placeholder="Enter your Gmail access token"
                            class=(FORM_TEXT_INPUT_STYLE)
                            value="";
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Settings" }
                }
            }
        }
    };

    base("Settings", &content).into_response()
}
