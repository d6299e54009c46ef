// Chart session manager - slot ownership of live chart instances
use crate::application::chart_backend::{ChartBackend, ChartHandle, ChartSpec, LegendLabels};
use crate::domain::align::AlignedSeries;
use crate::domain::error::ChartError;
use crate::domain::slot::ChartSlot;
use std::collections::HashMap;
use std::sync::Arc;

struct ChartSession {
    series: AlignedSeries,
    spec: ChartSpec,
    handle: Box<dyn ChartHandle>,
}

/// Owns the slot → live-chart table. At most one live handle exists per slot;
/// every render into an occupied slot tears the old instance down first, so
/// repeated renders never leak draw-surface resources.
///
/// The table has a single logical writer. Hosts with more than one thread
/// must wrap the manager in a mutex.
pub struct ChartSessionManager {
    backend: Arc<dyn ChartBackend>,
    slots: HashMap<ChartSlot, ChartSession>,
}

impl ChartSessionManager {
    pub fn new(backend: Arc<dyn ChartBackend>) -> Self {
        Self {
            backend,
            slots: HashMap::new(),
        }
    }

    /// Render an aligned series into `slot` on the surface named `target`.
    ///
    /// When no surface backs the target, the render is logged and skipped
    /// (`Ok(None)`) and the slot keeps whatever it held before. Otherwise
    /// the previous instance is destroyed, a fresh chart is mounted and the
    /// new spec is returned.
    pub fn render(
        &mut self,
        slot: ChartSlot,
        target: &str,
        series: AlignedSeries,
        legend: &LegendLabels,
        title: &str,
    ) -> anyhow::Result<Option<&ChartSpec>> {
        if !self.backend.has_surface(target) {
            tracing::warn!(
                "render into slot {} skipped: {}",
                slot,
                ChartError::MissingDrawSurface {
                    target: target.to_string()
                }
            );
            return Ok(None);
        }

        self.destroy(slot);

        let spec = ChartSpec::from_series(&series, legend, title);
        let handle = self.backend.mount(target, &spec)?;
        self.slots.insert(
            slot,
            ChartSession {
                series,
                spec,
                handle,
            },
        );

        tracing::debug!("mounted chart for slot {} on '{}'", slot, target);
        Ok(self.slots.get(&slot).map(|s| &s.spec))
    }

    /// Destroy and clear a slot. Idempotent when the slot is already empty.
    pub fn destroy(&mut self, slot: ChartSlot) {
        if let Some(mut session) = self.slots.remove(&slot) {
            session.handle.destroy();
            tracing::debug!("destroyed chart in slot {}", slot);
        }
    }

    /// Clear a slot without mounting a replacement (upstream selection
    /// changed and no new data exists yet).
    pub fn reset(&mut self, slot: ChartSlot) {
        self.destroy(slot);
    }

    /// The aligned series behind a live slot, for tabular export.
    pub fn series(&self, slot: ChartSlot) -> Option<&AlignedSeries> {
        self.slots.get(&slot).map(|s| &s.series)
    }

    /// The spec currently mounted in a slot.
    pub fn spec(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.slots.get(&slot).map(|s| &s.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::align::align;
    use crate::domain::period::Period;
    use crate::domain::series::{ForecastPoint, TimePoint};
    use std::sync::Mutex;

    /// Backend that records which targets currently hold a live chart.
    struct StubBackend {
        surfaces: Vec<String>,
        live: Arc<Mutex<Vec<String>>>,
    }

    #[derive(Debug)]
    struct StubHandle {
        target: String,
        live: Arc<Mutex<Vec<String>>>,
    }

    impl ChartHandle for StubHandle {
        fn destroy(&mut self) {
            let mut live = self.live.lock().unwrap();
            if let Some(idx) = live.iter().position(|t| t == &self.target) {
                live.remove(idx);
            }
        }
    }

    impl ChartBackend for StubBackend {
        fn has_surface(&self, target: &str) -> bool {
            self.surfaces.iter().any(|s| s == target)
        }

        fn mount(&self, target: &str, _spec: &ChartSpec) -> anyhow::Result<Box<dyn ChartHandle>> {
            self.live.lock().unwrap().push(target.to_string());
            Ok(Box::new(StubHandle {
                target: target.to_string(),
                live: self.live.clone(),
            }))
        }
    }

    fn setup(surfaces: &[&str]) -> (ChartSessionManager, Arc<Mutex<Vec<String>>>) {
        let live = Arc::new(Mutex::new(Vec::new()));
        let backend = StubBackend {
            surfaces: surfaces.iter().map(|s| s.to_string()).collect(),
            live: live.clone(),
        };
        (ChartSessionManager::new(Arc::new(backend)), live)
    }

    fn sample_series() -> AlignedSeries {
        let historical = vec![
            TimePoint::new(Period::Year(2020), 10.0),
            TimePoint::new(Period::Year(2021), 20.0),
        ];
        let forecast = vec![ForecastPoint::new(Period::Year(2022), 25.0, 20.0, 30.0)];
        align(&historical, &forecast).unwrap()
    }

    fn legend() -> LegendLabels {
        LegendLabels {
            historical: "Histórico".to_string(),
            forecast: "Previsão".to_string(),
            lower: "Limite inferior".to_string(),
            upper: "Limite superior".to_string(),
        }
    }

    #[test]
    fn test_repeated_render_keeps_one_live_instance() {
        let (mut manager, live) = setup(&["surface-a"]);

        for _ in 0..3 {
            let spec = manager
                .render(
                    ChartSlot::Primary,
                    "surface-a",
                    sample_series(),
                    &legend(),
                    "t",
                )
                .unwrap();
            assert!(spec.is_some());
        }

        assert_eq!(live.lock().unwrap().as_slice(), ["surface-a"]);
        assert_eq!(
            manager.spec(ChartSlot::Primary).unwrap(),
            &ChartSpec::from_series(&sample_series(), &legend(), "t")
        );
    }

    #[test]
    fn test_destroying_one_slot_leaves_the_other() {
        let (mut manager, live) = setup(&["surface-a", "surface-b"]);

        manager
            .render(ChartSlot::Primary, "surface-a", sample_series(), &legend(), "a")
            .unwrap();
        manager
            .render(ChartSlot::Secondary, "surface-b", sample_series(), &legend(), "b")
            .unwrap();

        manager.destroy(ChartSlot::Primary);

        assert_eq!(live.lock().unwrap().as_slice(), ["surface-b"]);
        assert!(manager.series(ChartSlot::Primary).is_none());
        assert!(manager.series(ChartSlot::Secondary).is_some());
    }

    #[test]
    fn test_destroy_empty_slot_is_idempotent() {
        let (mut manager, live) = setup(&["surface-a"]);
        manager.destroy(ChartSlot::Primary);
        manager.destroy(ChartSlot::Primary);
        assert!(live.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_surface_skips_and_keeps_previous_chart() {
        let (mut manager, live) = setup(&["surface-a"]);

        manager
            .render(ChartSlot::Primary, "surface-a", sample_series(), &legend(), "t")
            .unwrap();
        let skipped = manager
            .render(ChartSlot::Primary, "missing", sample_series(), &legend(), "t")
            .unwrap();

        assert!(skipped.is_none());
        assert_eq!(live.lock().unwrap().as_slice(), ["surface-a"]);
        assert!(manager.series(ChartSlot::Primary).is_some());
    }

    #[test]
    fn test_reset_clears_export_read_back() {
        let (mut manager, _live) = setup(&["surface-a"]);
        manager
            .render(ChartSlot::Primary, "surface-a", sample_series(), &legend(), "t")
            .unwrap();
        manager.reset(ChartSlot::Primary);
        assert!(manager.series(ChartSlot::Primary).is_none());
        assert!(manager.spec(ChartSlot::Primary).is_none());
    }
}
