//! The application's route URIs.

/// The dashboard page showing the financial summary and recent transactions.
pub const DASHBOARD_VIEW: &str = "/";
/// The page for configuring the external API tokens.
pub const SETTINGS_VIEW: &str = "/settings";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list and create categories.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route for the settings form submission.
pub const SETTINGS_API: &str = "/api/settings";
