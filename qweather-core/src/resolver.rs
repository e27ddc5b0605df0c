//! Free-text city name to [`Location`].

use tracing::debug;

use crate::{
    context::CallContext,
    endpoint::CITY_LOOKUP,
    envelope::{decode, require_success},
    error::{QWeatherError, Result},
    log_level::LogLevel,
    model::{Coordinates, Location, LocationCandidate, LocationResponse},
    transport::Transport,
};

/// Looks cities up through a borrowed transport. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    transport: &'a dyn Transport,
}

impl<'a> LocationResolver<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Raw candidate list for `name`, with the status already checked.
    pub async fn lookup(&self, name: &str, ctx: &CallContext) -> Result<Vec<LocationCandidate>> {
        let body = self
            .transport
            .get(&CITY_LOOKUP, &[], &[("location", name)], ctx)
            .await?;
        let response: LocationResponse =
            decode(CITY_LOOKUP.resource, &body, self.transport.log_level())?;
        Ok(require_success(response)?.location)
    }

    /// First candidate for `name`. There is no ranking; callers that need a
    /// specific match should send a more specific name.
    pub async fn resolve(&self, name: &str, ctx: &CallContext) -> Result<Location> {
        let candidates = self.lookup(name, ctx).await?;
        if self.transport.log_level() >= LogLevel::Debug {
            debug!(query = name, candidates = candidates.len(), "city lookup");
        }

        let first = candidates
            .into_iter()
            .next()
            .ok_or(QWeatherError::NoMatchingCity)?;
        Ok(location_from(first))
    }
}

fn location_from(candidate: LocationCandidate) -> Location {
    Location {
        latitude: format_coordinate(&candidate.lat),
        longitude: format_coordinate(&candidate.lon),
        raw_coordinates: Coordinates {
            latitude: candidate.lat.trim().to_string(),
            longitude: candidate.lon.trim().to_string(),
        },
        id: candidate.id,
        name: candidate.name,
        adm1: candidate.adm1,
        adm2: candidate.adm2,
        country: candidate.country,
    }
}

/// Re-render a decimal coordinate at two places.
///
/// Unparseable input becomes `0.00`. This is the only place that policy lives.
pub fn format_coordinate(raw: &str) -> String {
    let value = raw.trim().parse::<f64>().unwrap_or(0.0);
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Canned(&'static str);

    #[async_trait]
    impl Transport for Canned {
        async fn get(
            &self,
            endpoint: &Endpoint,
            _path_params: &[&str],
            query: &[(&str, &str)],
            _ctx: &CallContext,
        ) -> Result<Vec<u8>> {
            assert_eq!(endpoint.path, "/geo/v2/city/lookup");
            assert_eq!(query, &[("location", "Shanghai")]);
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn formats_coordinates_at_two_places() {
        assert_eq!(format_coordinate("31.2304"), "31.23");
        assert_eq!(format_coordinate("121.4737"), "121.47");
        assert_eq!(format_coordinate("-33.8688"), "-33.87");
        assert_eq!(format_coordinate("39.9"), "39.90");
    }

    #[test]
    fn unparseable_coordinate_falls_back_to_zero() {
        assert_eq!(format_coordinate("abc"), "0.00");
        assert_eq!(format_coordinate(""), "0.00");
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_coordinate("121.4737");
        assert_eq!(format_coordinate(&once), once);
    }

    #[tokio::test]
    async fn takes_first_candidate() {
        let transport = Canned(
            r#"{"code":"200","location":[
                {"name":"Shanghai","id":"101020100","lat":"31.2304","lon":"121.4737","adm1":"Shanghai","adm2":"Shanghai","country":"China"},
                {"name":"Shanghai Pudong","id":"101020600","lat":"31.22","lon":"121.55"}
            ]}"#,
        );
        let resolver = LocationResolver::new(&transport);

        let location = resolver.resolve("Shanghai", &CallContext::new()).await.unwrap();
        assert_eq!(location.id, "101020100");
        assert_eq!(location.latitude, "31.23");
        assert_eq!(location.longitude, "121.47");
        assert_eq!(location.raw_coordinates.lon_lat(), "121.4737,31.2304");
        assert_eq!(location.country, "China");
    }

    #[tokio::test]
    async fn resolution_is_repeatable() {
        let transport = Canned(
            r#"{"code":"200","location":[{"name":"Shanghai","id":"101020100","lat":"31.2304","lon":"121.4737"}]}"#,
        );
        let resolver = LocationResolver::new(&transport);
        let ctx = CallContext::new();

        let first = resolver.resolve("Shanghai", &ctx).await.unwrap();
        let second = resolver.resolve("Shanghai", &ctx).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_candidate_list_is_no_match() {
        let transport = Canned(r#"{"code":"200","location":[]}"#);
        let err = LocationResolver::new(&transport)
            .resolve("Shanghai", &CallContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, QWeatherError::NoMatchingCity));
    }

    #[tokio::test]
    async fn upstream_code_is_not_a_no_match() {
        let transport = Canned(r#"{"code":"404"}"#);
        let err = LocationResolver::new(&transport)
            .resolve("Shanghai", &CallContext::new())
            .await
            .unwrap_err();
        assert_eq!(err.upstream_code(), Some("404"));
    }

    #[tokio::test]
    async fn empty_status_is_never_rescued_for_lookups() {
        let transport = Canned(r#"{"location":[{"name":"Shanghai","id":"1"}]}"#);
        let err = LocationResolver::new(&transport)
            .resolve("Shanghai", &CallContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, QWeatherError::Upstream { ref code } if code.is_empty()));
    }
}
