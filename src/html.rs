//! Shared HTML templates and Tailwind style constants.

use maud::{DOCTYPE, Markup, html};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Summary card styles
pub const CARD_STYLE: &str = "w-full rounded-lg bg-white p-6 shadow \
    dark:bg-gray-800 dark:border dark:border-gray-700";
pub const CARD_LABEL_STYLE: &str = "text-sm font-medium text-gray-500 dark:text-gray-400";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The base HTML skeleton shared by every page.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Neno Finance" }

                script src="https://cdn.tailwindcss.com" {}
            }

            body
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// Render an amount as dollars with two decimal places, e.g. `-$12.30`.
pub fn format_currency(number: f64) -> String {
    if number < 0.0 {
        format!("-${:.2}", number.abs())
    } else {
        format!("${number:.2}")
    }
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_positive_and_negative_amounts() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(-12.3), "-$12.30");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.567), "$1234.57");
    }
}
