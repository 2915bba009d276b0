pub mod annotations;
pub mod coords;
pub mod diff;
pub mod export;
pub mod geo;
pub mod metrics;
pub mod models;
pub mod picker;
pub mod projection;
pub mod seamark;
pub mod session;

pub use annotations::Annotations;
pub use coords::{csv_position, table_position, CoordFormatter, CoordPattern, HemisphereFormatter};
pub use diff::{diff_points, DiffKind, PointDiff};
pub use export::{export_route, ExportContext, ExportFile, ExportFormat, RouteFeature, RouteGeometry};
pub use geo::{distance_nm, fixed, haversine_distance, initial_bearing, GeoError};
pub use metrics::{description_input_id, DisplayModel, Leg, RouteSummary, SegmentRenderer, SegmentRow};
pub use models::{CoordStyle, DistanceUnit, Point, TableLabels};
pub use picker::{LabelPicker, OpenPicker, PickerError};
pub use projection::{LonLat, Projection, WebMercator};
pub use seamark::{
    nearest_labels, rank_features, FeatureElement, FeatureKind, FeatureResponse, RankedFeature,
    MAX_RESULTS, SEARCH_RADIUS_M,
};
pub use session::{EditEvent, EditMode, EditSession, RouteEditor, SessionError, SessionSnapshot};
