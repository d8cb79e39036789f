//! Application constants for the air quality dashboard
//!
//! Column names, accepted date formats, palettes and widget defaults used
//! throughout the dashboard.

// =============================================================================
// Dataset Columns
// =============================================================================

/// Column names of the input file and of the normalized dataset frame
pub mod columns {
    pub const DATE: &str = "Date";
    pub const COUNTRY: &str = "Country";
    pub const CITY: &str = "City";
    pub const AQI: &str = "AQI";

    /// Derived calendar year
    pub const YEAR: &str = "Year";
    /// Derived month number (1-12)
    pub const MONTH: &str = "Month";
    /// Derived `year * 100 + month` key
    pub const YEAR_MONTH: &str = "YearMonth";
    /// Derived day number counted from the common era
    pub const DAY: &str = "Day";

    /// Columns every input file must provide
    pub const REQUIRED: &[&str] = &[
        DATE, COUNTRY, CITY, "PM2.5", "PM10", "Ozone", "NO2", "SO2", "CO", AQI,
    ];
}

/// Date formats accepted when coercing the `Date` column, tried in order.
/// Day-first formats come before ambiguous alternatives.
pub const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Timestamp formats whose time component is discarded
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d-%m-%Y %H:%M:%S"];

// =============================================================================
// Calendar
// =============================================================================

/// Month abbreviations used for categorical month axes
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Air Quality Index
// =============================================================================

/// Upper bounds (inclusive) of the AQI categories below "Hazardous"
pub mod aqi_thresholds {
    pub const GOOD: f64 = 50.0;
    pub const MODERATE: f64 = 100.0;
    pub const UNHEALTHY: f64 = 150.0;
    pub const VERY_UNHEALTHY: f64 = 200.0;
}

// =============================================================================
// Chart Styling
// =============================================================================

/// Default color scale bounds when a view has no values
pub const DEFAULT_COLOR_LOW: f64 = 0.0;
pub const DEFAULT_COLOR_HIGH: f64 = 1.0;

/// Fill used for regions without data
pub const NO_DATA_COLOR: &str = "white";

/// Sequential palette name for heatmaps and the choropleth
pub const SEQUENTIAL_PALETTE: &str = "Viridis256";

/// Diverging palette name for the scatter AQI coloring
pub const DIVERGING_PALETTE: &str = "RdYlGn11";

/// Category20 palette, cycled over countries in the regional trends chart
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// City line colors for the time-series chart, cycled over cities
pub const CITY_COLORS: [&str; 10] = [
    "red", "yellow", "black", "blue", "green", "orange", "purple", "pink", "brown", "cyan",
];

/// Line dash per pollutant index in the time-series chart
pub const LINE_DASHES: [&str; 6] = ["solid", "dashed", "dotted", "dotdash", "dashdot", "solid"];

/// Stacked area fill per pollutant, in canonical pollutant order
pub const POLLUTANT_COLORS: [&str; 6] = ["dodgerblue", "orange", "green", "red", "purple", "brown"];

/// Scatter marker size range derived from PM10
pub const SCATTER_MIN_SIZE: f64 = 5.0;
pub const SCATTER_SIZE_SPAN: f64 = 10.0;

/// Padding factors applied to the box plot value axis
pub const BOX_RANGE_LOW_PAD: f64 = 0.9;
pub const BOX_RANGE_HIGH_PAD: f64 = 1.1;

// =============================================================================
// Widget Defaults
// =============================================================================

/// Select value meaning "no constraint"
pub const ALL_OPTION: &str = "All";

/// Default animation tick interval in milliseconds
pub const DEFAULT_ANIMATION_INTERVAL_MS: u64 = 1000;

/// Default scatter sample size and seed
pub const DEFAULT_SCATTER_SAMPLE_SIZE: usize = 5000;
pub const DEFAULT_SCATTER_SEED: u64 = 42;

/// Maximum number of cities selectable in the time-series tab
pub const DEFAULT_MAX_SELECTED_CITIES: usize = 3;

/// Countries preselected in the grouped bar chart
pub const DEFAULT_GROUPED_BAR_COUNTRIES: &[&str] = &["USA", "India", "China"];

/// GeoJSON feature properties tried, in order, for the country name
pub const BOUNDARY_NAME_PROPERTIES: &[&str] = &["NAME", "name", "ADMIN"];
