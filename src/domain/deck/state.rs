//! Device state entity

use super::provider::ProviderId;

/// Lower bound of the parameter dial
pub const PARAMETER_MIN: f64 = 0.0;
/// Upper bound of the parameter dial
pub const PARAMETER_MAX: f64 = 1.0;
/// Parameter value at power-on
pub const DEFAULT_PARAMETER: f64 = 0.5;

/// Idle status phrase
pub const STATUS_READY: &str = "Ready";
/// Status after a provider switch to an unknown identifier
pub const STATUS_UNKNOWN_PROVIDER: &str = "Unknown provider";

/// Decimal places kept after each adjustment, so repeated steps land on the grid
const PARAMETER_SCALE: f64 = 1_000_000.0;

/// The deck's single mutable record.
///
/// Owned by the action dispatcher; every mutation goes through it so the
/// invariants below hold for the process lifetime:
/// - `parameter` is within [0.0, 1.0]
/// - `provider` is always a known provider
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    provider: ProviderId,
    parameter: f64,
    status: String,
    last_result: String,
}

impl DeviceState {
    /// Power-on state: GPT, parameter 0.5, "Ready"
    pub fn new() -> Self {
        Self::with_initial(ProviderId::default(), DEFAULT_PARAMETER)
    }

    /// State with a configured provider and parameter (clamped)
    pub fn with_initial(provider: ProviderId, parameter: f64) -> Self {
        Self {
            provider,
            parameter: quantize(clamp_parameter(parameter)),
            status: STATUS_READY.to_string(),
            last_result: String::new(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn parameter(&self) -> f64 {
        self.parameter
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    pub fn is_ready(&self) -> bool {
        self.status == STATUS_READY
    }

    /// Overwrite the status phrase
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Switch provider by raw identifier.
    ///
    /// Known ids select the provider and set the status to `"→ {ID}"`.
    /// Unknown ids leave the provider untouched and set `"Unknown provider"`.
    /// Returns whether the switch happened.
    pub fn set_provider(&mut self, id: &str) -> bool {
        match id.parse::<ProviderId>() {
            Ok(provider) => {
                self.provider = provider;
                self.status = format!("→ {}", provider.label());
                true
            }
            Err(_) => {
                self.status = STATUS_UNKNOWN_PROVIDER.to_string();
                false
            }
        }
    }

    /// Move the parameter by `delta`, clamped to [0.0, 1.0].
    ///
    /// Returns whether the stored value changed.
    pub fn adjust_parameter(&mut self, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let before = self.parameter;
        self.parameter = quantize(clamp_parameter(before + delta));
        self.parameter != before
    }

    /// Overwrite the last successful result
    pub fn record_result(&mut self, text: impl Into<String>) {
        self.last_result = text.into();
    }

    /// Two-line screen blob: `LLM:{PROVIDER} T:{parameter}` over the status
    pub fn render(&self) -> String {
        format!(
            "LLM:{} T:{:.1}\n{}",
            self.provider.label(),
            self.parameter,
            self.status
        )
    }

    /// Copy of the observable fields
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            provider: self.provider,
            parameter: self.parameter,
            status: self.status.clone(),
            last_result: self.last_result.clone(),
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the device state, published after every refresh
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub provider: ProviderId,
    pub parameter: f64,
    pub status: String,
    pub last_result: String,
}

impl DeviceSnapshot {
    /// Single-line summary for status queries
    pub fn summary(&self) -> String {
        format!(
            "provider={} parameter={:.1} status={}",
            self.provider.label(),
            self.parameter,
            self.status
        )
    }
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        DeviceState::new().snapshot()
    }
}

fn clamp_parameter(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_PARAMETER;
    }
    value.clamp(PARAMETER_MIN, PARAMETER_MAX)
}

fn quantize(value: f64) -> f64 {
    (value * PARAMETER_SCALE).round() / PARAMETER_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = DeviceState::new();
        assert_eq!(state.provider(), ProviderId::Gpt);
        assert_eq!(state.parameter(), 0.5);
        assert_eq!(state.status(), "Ready");
        assert!(state.last_result().is_empty());
        assert!(state.is_ready());
    }

    #[test]
    fn large_deltas_saturate_at_one() {
        let mut state = DeviceState::new();
        for _ in 0..10 {
            state.adjust_parameter(0.7);
            assert!(state.parameter() <= 1.0);
        }
        assert_eq!(state.parameter(), 1.0);
    }

    #[test]
    fn negative_deltas_saturate_at_zero() {
        let mut state = DeviceState::new();
        assert!(state.adjust_parameter(-3.0));
        assert_eq!(state.parameter(), 0.0);
        assert!(!state.adjust_parameter(-0.1));
        assert_eq!(state.parameter(), 0.0);
    }

    #[test]
    fn steps_land_on_decimal_grid() {
        let mut state = DeviceState::new();
        for _ in 0..3 {
            assert!(state.adjust_parameter(0.1));
        }
        assert_eq!(state.parameter(), 0.8);
    }

    #[test]
    fn adjust_reports_no_change_at_bound() {
        let mut state = DeviceState::with_initial(ProviderId::Gpt, 1.0);
        assert!(!state.adjust_parameter(0.1));
        assert_eq!(state.parameter(), 1.0);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut state = DeviceState::new();
        assert!(!state.adjust_parameter(f64::NAN));
        assert!(!state.adjust_parameter(f64::INFINITY));
        assert_eq!(state.parameter(), 0.5);
    }

    #[test]
    fn initial_parameter_is_clamped() {
        assert_eq!(DeviceState::with_initial(ProviderId::Gpt, 4.2).parameter(), 1.0);
        assert_eq!(DeviceState::with_initial(ProviderId::Gpt, -1.0).parameter(), 0.0);
        assert_eq!(DeviceState::with_initial(ProviderId::Gpt, f64::NAN).parameter(), 0.5);
    }

    #[test]
    fn set_known_provider() {
        let mut state = DeviceState::new();
        assert!(state.set_provider("gemini"));
        assert_eq!(state.provider(), ProviderId::Gemini);
        assert_eq!(state.status(), "→ GEMINI");
    }

    #[test]
    fn set_unknown_provider_keeps_current() {
        let mut state = DeviceState::new();
        state.set_provider("llama");
        assert!(!state.set_provider("claude"));
        assert_eq!(state.provider(), ProviderId::Llama);
        assert_eq!(state.status(), "Unknown provider");
    }

    #[test]
    fn render_matches_screen_layout() {
        let mut state = DeviceState::new();
        assert_eq!(state.render(), "LLM:GPT T:0.5\nReady");
        state.adjust_parameter(0.2);
        state.set_status("Done!");
        assert_eq!(state.render(), "LLM:GPT T:0.7\nDone!");
    }

    #[test]
    fn record_result_overwrites() {
        let mut state = DeviceState::new();
        state.record_result("first");
        state.record_result("second");
        assert_eq!(state.last_result(), "second");
        assert_eq!(state.snapshot().last_result, "second");
    }

    #[test]
    fn snapshot_summary() {
        let snapshot = DeviceState::new().snapshot();
        assert_eq!(snapshot.summary(), "provider=GPT parameter=0.5 status=Ready");
    }
}
