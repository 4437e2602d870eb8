mod coordinator;
mod digitraffic;
mod error;
mod fetch;
mod mock;
mod normalize;
mod sections;
mod translation;
mod types;
mod utils;

pub use digitraffic::Digitraffic;
pub use error::DigitrafficError;

pub use coordinator::acquisition::AcquisitionClient;
pub use coordinator::error::AcquisitionError;
pub use coordinator::polling::*;

pub use fetch::endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use fetch::error::FetchError;
pub use fetch::http_fetcher::{fetch_as, Fetch, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
pub use fetch::payloads::*;

pub use mock::generator::*;

pub use normalize::code_tables::{
    road_condition_text, translate_code, translate_wmo_code, wmo_text, CodeDomain,
};
pub use normalize::display::{
    format_station_name, humanize_key, measurement_display_name, slugify_measurement_key,
};
pub use normalize::normalizer::{DisplayReading, Normalizer, MAX_FORECAST_ENTRIES};
pub use normalize::profiles::*;
pub use normalize::units::{resolve_unit, PERCENT_PLACEHOLDER};

pub use sections::catalogue::{find_section, mock_section_features, search_sections, ROAD_SECTIONS};
pub use sections::directory::{SectionDirectory, DEFAULT_METADATA_MAX_AGE};
pub use sections::error::SectionDirectoryError;
pub use sections::resolver::{is_native_section_id, normalize_text, tokenize, Resolution, SectionResolver};

pub use translation::{NoTranslations, TranslationCatalog, TranslationLookup};

pub use types::condition::*;
pub use types::error::ConfigurationError;
pub use types::language::Language;
pub use types::measurement::*;
pub use types::monitor_target::*;
pub use types::road_section::*;
pub use types::snapshot::*;
