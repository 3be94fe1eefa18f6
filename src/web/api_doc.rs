use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::geometry::GeoPoint;
use crate::tracker::Sample;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::samples::track,
        super::api::samples::latest,
        super::api::samples::list,
    ),
    components(schemas(Sample, GeoPoint, ErrorResponse)),
    info(
        title = "ISS-O-Mat API",
        description = "Records ISS positions and their ground-track speed",
        version = "0.1.0"
    ),
    tags(
        (name = "samples", description = "Position samples and speed")
    )
)]
pub struct ApiDoc;
