//! End-to-end walk through a target-area editing session.

use std::sync::Arc;

use blast_core::config::{GeocoderConfig, TargetingConfig};
use blast_core::{BlastError, GeoPoint};
use blast_targeting::{
    miles_to_meters, zoom_level_for_radius, AddressResolver, EditSession, ResolutionOutcome,
    StaticGeocoder, RADIUS_TIERS,
};
use uuid::Uuid;

#[tokio::test]
async fn edit_session_walkthrough() {
    let geocoder = Arc::new(StaticGeocoder::with_demo_addresses());
    let resolver = AddressResolver::new(geocoder, &GeocoderConfig::default());
    let mut session = EditSession::new(Uuid::new_v4(), &TargetingConfig::default()).unwrap();

    // Every tier offered by the selector is accepted.
    for tier in RADIUS_TIERS {
        let area = *session.select_radius(tier.radius_miles).unwrap();
        assert_eq!(area.zoom_level, zoom_level_for_radius(tier.radius_miles));
        assert_eq!(session.tier().label(), tier.label());
    }

    session.select_radius(10.0).unwrap();
    let outcome = session
        .resolve_address(&resolver, "123 Ocean Drive, Miami, FL")
        .await
        .unwrap();
    assert!(matches!(outcome, ResolutionOutcome::Applied(_)));
    assert_eq!(session.area().center, GeoPoint::new(25.7743, -80.1307));
    assert_eq!(session.area().radius_miles, 10.0);
    assert!((session.area().radius_meters() - miles_to_meters(10.0)).abs() < 1e-9);

    // Unknown address leaves the last good center in place.
    let err = session
        .resolve_address(&resolver, "1 Nowhere Rd")
        .await
        .unwrap_err();
    assert!(matches!(err, BlastError::AddressNotFound(_)));
    assert_eq!(session.area().center, GeoPoint::new(25.7743, -80.1307));

    // Dragging the marker afterwards keeps radius and zoom.
    let zoom = session.area().zoom_level;
    session.relocate(GeoPoint::new(26.1224, -80.1373)).unwrap();
    assert_eq!(session.area().zoom_level, zoom);
    assert_eq!(session.area().center, GeoPoint::new(26.1224, -80.1373));
}
