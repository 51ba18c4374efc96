mod gga;
mod gsa;
mod gsv;
mod rmc;

pub use gga::{GgaDecoder, PositionFix};
pub use gsa::{DopAndActiveSatellites, GsaDecoder};
pub use gsv::{GsvDecoder, Satellite, SatelliteVisibility};
pub use rmc::{RmcDecoder, RouteRecommendation};
