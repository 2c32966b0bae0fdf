/// Base URL of the transaction store.
pub const DEFAULT_STORE_URL: &str = "https://currency-converter-backend-vercel-fix.vercel.app";

/// Base URL of the exchange rate service.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com";

/// Collection path on the transaction store.
pub const STORE_COLLECTION_PATH: &str = "/api/workouts";

/// Latest-rates path on the exchange rate service. The base currency code is appended.
pub const RATES_LATEST_PATH: &str = "/v6/latest";

/// US-English style date, e.g. `10/17/2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// US-English style time, e.g. `3:04:05 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M:%S %p";
