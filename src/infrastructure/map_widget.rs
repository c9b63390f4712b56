//! Map widget lifecycle
//!
//! Owns at most one map instance for a container. The instance is created
//! when points arrive, filled with markers once the engine reports it has
//! loaded, and removed on unmount, on a new point list, or when the widget is
//! dropped.

use std::sync::Arc;

use crate::application::dto::PointOfInterest;
use crate::application::ports::outbound::{
    MapEngine, MapInstance, MapOptions, MapWidgetError, MarkerSpec,
};
use crate::domain::services::escape_xml;
use crate::domain::value_objects::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Uninitialized,
    Loading,
    Ready { markers: usize },
    Error(MapWidgetError),
}

/// Popup markup linking a marker to its attraction page
pub fn popup_html(point: &PointOfInterest) -> String {
    format!(
        r#"<a href="/attractions/{}">{}</a>"#,
        escape_xml(&point.slug),
        escape_xml(&point.name)
    )
}

pub struct MapWidget<E: MapEngine> {
    engine: E,
    container: String,
    options: MapOptions,
    points: Option<Arc<[PointOfInterest]>>,
    instance: Option<E::Instance>,
    state: WidgetState,
}

impl<E: MapEngine> MapWidget<E> {
    pub fn new(engine: E, container: impl Into<String>, options: MapOptions) -> Self {
        Self {
            engine,
            container: container.into(),
            options,
            points: None,
            instance: None,
            state: WidgetState::Uninitialized,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn instance(&self) -> Option<&E::Instance> {
        self.instance.as_ref()
    }

    /// Hand the widget a point list.
    ///
    /// The same list (by identity) is a no-op. A different list tears down
    /// the current instance and creates a fresh one. While in `Error` the list
    /// is remembered but nothing is created until the widget is remounted.
    pub fn set_points(&mut self, points: Arc<[PointOfInterest]>) {
        if let Some(current) = &self.points {
            if Arc::ptr_eq(current, &points) {
                return;
            }
        }
        self.points = Some(points);

        if matches!(self.state, WidgetState::Error(_)) {
            tracing::debug!(container = %self.container, "Map in error state; new points ignored until remount");
            return;
        }

        self.teardown();
        self.mount();
    }

    fn mount(&mut self) {
        if self.options.access_token.trim().is_empty() {
            self.fail(MapWidgetError::MissingToken);
            return;
        }

        match self.engine.create(&self.container, &self.options) {
            Ok(instance) => {
                self.instance = Some(instance);
                self.state = WidgetState::Loading;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Engine finished loading: place one marker per point
    pub fn on_load(&mut self) {
        if self.state != WidgetState::Loading {
            return;
        }
        let Some(points) = self.points.clone() else {
            return;
        };
        let Some(instance) = self.instance.as_mut() else {
            return;
        };

        let mut placed = 0;
        let mut failure = None;
        for point in points.iter() {
            let position = match GeoPoint::new(point.lat, point.lng) {
                Ok(position) => position,
                Err(e) => {
                    tracing::warn!(slug = %point.slug, error = %e, "Skipping marker with invalid coordinates");
                    continue;
                }
            };
            let marker = MarkerSpec {
                position,
                popup_html: popup_html(point),
                category: point.category.clone(),
            };
            if let Err(e) = instance.add_marker(marker) {
                failure = Some(e);
                break;
            }
            placed += 1;
        }

        if let Some(e) = failure {
            self.fail(e);
            return;
        }

        tracing::debug!(container = %self.container, markers = placed, "Map ready");
        self.state = WidgetState::Ready { markers: placed };
    }

    /// Engine reported a runtime failure
    pub fn on_error(&mut self, message: impl Into<String>) {
        self.fail(MapWidgetError::Engine(message.into()));
    }

    /// Remove the instance and forget the points; the widget may be reused
    pub fn unmount(&mut self) {
        self.teardown();
        self.points = None;
        self.state = WidgetState::Uninitialized;
    }

    fn fail(&mut self, error: MapWidgetError) {
        tracing::warn!(container = %self.container, error = %error, "Map widget failed");
        self.teardown();
        self.state = WidgetState::Error(error);
    }

    fn teardown(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.remove();
        }
    }
}

impl<E: MapEngine> Drop for MapWidget<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Log {
        created: usize,
        removed: usize,
        markers: Vec<MarkerSpec>,
    }

    #[derive(Clone, Default)]
    struct FakeEngine {
        log: Arc<Mutex<Log>>,
        fail_create: bool,
        fail_markers: bool,
    }

    struct FakeInstance {
        log: Arc<Mutex<Log>>,
        fail_markers: bool,
    }

    impl MapInstance for FakeInstance {
        fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), MapWidgetError> {
            if self.fail_markers {
                return Err(MapWidgetError::Engine("marker rejected".to_string()));
            }
            self.log.lock().unwrap().markers.push(marker);
            Ok(())
        }

        fn remove(&mut self) {
            self.log.lock().unwrap().removed += 1;
        }
    }

    impl MapEngine for FakeEngine {
        type Instance = FakeInstance;

        fn create(&self, _container: &str, _options: &MapOptions) -> Result<FakeInstance, MapWidgetError> {
            if self.fail_create {
                return Err(MapWidgetError::Initialization("no webgl".to_string()));
            }
            self.log.lock().unwrap().created += 1;
            Ok(FakeInstance {
                log: self.log.clone(),
                fail_markers: self.fail_markers,
            })
        }
    }

    fn options(token: &str) -> MapOptions {
        MapOptions {
            access_token: token.to_string(),
            style: "mapbox://styles/mapbox/streets-v12".to_string(),
            center: GeoPoint::new(64.5, -19.0).unwrap(),
            zoom: 5.2,
            bounds: None,
        }
    }

    fn points(names: &[&str]) -> Arc<[PointOfInterest]> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| PointOfInterest {
                slug: name.to_lowercase().replace(' ', "-"),
                name: name.to_string(),
                lat: 64.0 + i as f64 * 0.1,
                lng: -20.0,
                category: None,
            })
            .collect()
    }

    #[test]
    fn test_lifecycle_places_one_marker_per_point() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));
        assert_eq!(widget.state(), &WidgetState::Uninitialized);

        widget.set_points(points(&["Blue Lagoon", "Kirkjufell"]));
        assert_eq!(widget.state(), &WidgetState::Loading);

        widget.on_load();
        assert_eq!(widget.state(), &WidgetState::Ready { markers: 2 });

        let log = log.lock().unwrap();
        assert_eq!(log.created, 1);
        assert_eq!(
            log.markers[0].popup_html,
            r#"<a href="/attractions/blue-lagoon">Blue Lagoon</a>"#
        );
    }

    #[test]
    fn test_empty_points_is_ready_with_no_markers() {
        let mut widget = MapWidget::new(FakeEngine::default(), "map", options("pk.test"));
        widget.set_points(points(&[]));
        widget.on_load();
        assert_eq!(widget.state(), &WidgetState::Ready { markers: 0 });
    }

    #[test]
    fn test_ready_then_empty_list_recreates_without_markers() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));

        widget.set_points(points(&["Geysir", "Gullfoss"]));
        widget.on_load();
        assert_eq!(widget.state(), &WidgetState::Ready { markers: 2 });

        widget.set_points(points(&[]));
        widget.on_load();
        assert_eq!(widget.state(), &WidgetState::Ready { markers: 0 });

        let log = log.lock().unwrap();
        assert_eq!(log.created, 2);
        assert_eq!(log.removed, 1);
        assert_eq!(log.markers.len(), 2);
    }

    #[test]
    fn test_missing_token_is_error_without_instance() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("  "));
        widget.set_points(points(&["Geysir"]));

        assert_eq!(widget.state(), &WidgetState::Error(MapWidgetError::MissingToken));
        assert_eq!(log.lock().unwrap().created, 0);
    }

    #[test]
    fn test_creation_failure_is_error() {
        let engine = FakeEngine {
            fail_create: true,
            ..FakeEngine::default()
        };
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));
        widget.set_points(points(&["Geysir"]));
        assert!(matches!(
            widget.state(),
            WidgetState::Error(MapWidgetError::Initialization(_))
        ));
    }

    #[test]
    fn test_same_list_identity_is_noop_new_list_recreates() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));

        let first = points(&["Geysir"]);
        widget.set_points(first.clone());
        widget.on_load();
        widget.set_points(first);
        assert_eq!(log.lock().unwrap().created, 1);

        // Equal contents, new identity
        widget.set_points(points(&["Geysir"]));
        let counts = {
            let log = log.lock().unwrap();
            (log.created, log.removed)
        };
        assert_eq!(counts, (2, 1));
        assert_eq!(widget.state(), &WidgetState::Loading);
    }

    #[test]
    fn test_marker_failure_tears_down() {
        let engine = FakeEngine {
            fail_markers: true,
            ..FakeEngine::default()
        };
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));
        widget.set_points(points(&["Geysir"]));
        widget.on_load();

        assert!(matches!(widget.state(), WidgetState::Error(MapWidgetError::Engine(_))));
        assert_eq!(log.lock().unwrap().removed, 1);
        assert!(widget.instance().is_none());
    }

    #[test]
    fn test_error_is_terminal_until_remount() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        let mut widget = MapWidget::new(engine, "map", options("pk.test"));
        widget.set_points(points(&["Geysir"]));
        widget.on_error("style failed to load");

        widget.set_points(points(&["Gullfoss"]));
        assert!(matches!(widget.state(), WidgetState::Error(_)));
        assert_eq!(log.lock().unwrap().created, 1);

        widget.unmount();
        assert_eq!(widget.state(), &WidgetState::Uninitialized);
        widget.set_points(points(&["Gullfoss"]));
        assert_eq!(widget.state(), &WidgetState::Loading);
        assert_eq!(log.lock().unwrap().created, 2);
    }

    #[test]
    fn test_drop_tears_down_once() {
        let engine = FakeEngine::default();
        let log = engine.log.clone();
        {
            let mut widget = MapWidget::new(engine, "map", options("pk.test"));
            widget.set_points(points(&["Geysir"]));
            widget.on_load();
        }
        assert_eq!(log.lock().unwrap().removed, 1);
    }

    #[test]
    fn test_popup_escapes_name() {
        let point = PointOfInterest {
            slug: "a".to_string(),
            name: "Fish & <Chips>".to_string(),
            lat: 64.0,
            lng: -20.0,
            category: None,
        };
        assert_eq!(
            popup_html(&point),
            r#"<a href="/attractions/a">Fish &amp; &lt;Chips&gt;</a>"#
        );
    }
}
