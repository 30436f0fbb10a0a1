//! 분출 밸브 사이징 상태와 재계산 연쇄.
//!
//! 각 setter는 정해진 순서의 재계산을 끝까지 수행한 뒤(정착) 면적을 다시 구하고,
//! 상태가 일관된 다음에만 알림을 보낸다. 온도 ↔ 엔탈피 순환은 수동 엔탈피
//! 입력 때 한 번만 쓰이는 토큰으로 끊는다.

use std::sync::Arc;

use tracing::{debug, trace};

use super::formula::{required_area_sq_in, SizingInputs};
use super::ksh_grid::CorrectionFactorGrid;
use super::napier::kn_factor;
use super::notify::{ChangeEvent, Property, PropertyValue, SubscriptionId, Subscribers};
use super::phase::{classify, PhaseState, ENTHALPY_UNSET};
use crate::conversion::{bar_abs_to_psia, kg_per_s_to_lb_per_h, square_inch_to_square_mm};
use crate::steam::{PropertyError, SteamPropertyProvider};
use crate::units::{convert_pressure, PressureUnit};

/// 기본 유효 토출계수
pub const DEFAULT_KD: f64 = 0.975;
/// 기본 배압 보정계수
pub const DEFAULT_KB: f64 = 1.0;
/// 기본 파열판 조합 보정계수
pub const DEFAULT_KC: f64 = 1.0;
/// 대기압 [kPa]
pub const ATMOSPHERIC_PRESSURE_KPA: f64 = 101.0;
/// 허용 과압 배율 (10 %)
pub const ALLOWABLE_OVERPRESSURE: f64 = 1.10;

/// 엔진 상수 및 초기 보정계수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub atmospheric_pressure_kpa: f64,
    pub allowable_overpressure: f64,
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            atmospheric_pressure_kpa: ATMOSPHERIC_PRESSURE_KPA,
            allowable_overpressure: ALLOWABLE_OVERPRESSURE,
            kd: DEFAULT_KD,
            kb: DEFAULT_KB,
            kc: DEFAULT_KC,
        }
    }
}

/// 엔진이 단독으로 소유하는 사이징 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveSizingState {
    /// 입구 증기 온도 [°C]
    pub temperature_c: f64,
    /// 요구 분출 유량 [kg/s]
    pub mass_flow_kg_per_s: f64,
    /// 설정 압력 [bar g]
    pub set_pressure_bar_g: f64,
    /// 상류 분출 압력 [bar abs] = (설정 압력 + 대기압) × 허용 과압
    pub upstream_pressure_bar_abs: f64,
    /// 상류 비엔탈피 [kJ/kg]
    pub enthalpy_kj_per_kg: f64,
    /// 건도 [-]
    pub vapour_quality: f64,
    /// 요구 분출 면적 [mm²]
    pub discharge_area_mm2: f64,
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
    pub kn: f64,
    pub ksh: f64,
    pub is_saturated: bool,
}

impl ValveSizingState {
    fn new(settings: &EngineSettings) -> Self {
        Self {
            temperature_c: 0.0,
            mass_flow_kg_per_s: 0.0,
            set_pressure_bar_g: 0.0,
            upstream_pressure_bar_abs: 0.0,
            enthalpy_kj_per_kg: ENTHALPY_UNSET,
            vapour_quality: 0.0,
            discharge_area_mm2: 0.0,
            kd: settings.kd,
            kb: settings.kb,
            kc: settings.kc,
            kn: 0.0,
            ksh: 0.0,
            is_saturated: false,
        }
    }

    /// 알림으로 내보낼 현재 값.
    pub fn value(&self, property: Property) -> PropertyValue {
        let v = match property {
            Property::Temperature => self.temperature_c,
            Property::MassFlow => self.mass_flow_kg_per_s,
            Property::SetPressure => self.set_pressure_bar_g,
            Property::UpstreamPressure => self.upstream_pressure_bar_abs,
            Property::Enthalpy => self.enthalpy_kj_per_kg,
            Property::VapourQuality => self.vapour_quality,
            Property::Kd => self.kd,
            Property::Kb => self.kb,
            Property::Kc => self.kc,
            Property::Kn => self.kn,
            Property::Ksh => self.ksh,
            Property::DischargeArea => self.discharge_area_mm2,
            Property::IsSaturated => return PropertyValue::Flag(self.is_saturated),
        };
        PropertyValue::Number(v)
    }

    pub fn phase(&self) -> PhaseState {
        if self.is_saturated {
            PhaseState::Saturated
        } else {
            PhaseState::Superheated
        }
    }
}

/// 수동 엔탈피 입력 직후의 온도 재계산에서 h(p,T) 재계산을 한 번 건너뛰게 하는 토큰.
#[derive(Debug, Clone, Copy)]
struct ManualEnthalpy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnthalpySource {
    Manual,
    Derived,
}

/// 한 번의 setter 호출 동안 다시 계산된 물리량 기록.
#[derive(Debug)]
struct Cascade {
    origin: Property,
    touched: Vec<Property>,
    forced_phase: Option<PhaseState>,
}

impl Cascade {
    fn new(origin: Property) -> Self {
        Self {
            origin,
            touched: Vec::new(),
            forced_phase: None,
        }
    }

    fn touch(&mut self, property: Property) {
        if property != self.origin && !self.touched.contains(&property) {
            self.touched.push(property);
        }
    }

    /// 설정된 값, 영향받은 값(정렬 순서), 면적, 포화 여부 순.
    fn notification_order(mut self) -> Vec<Property> {
        self.touched
            .retain(|p| !matches!(p, Property::DischargeArea | Property::IsSaturated));
        self.touched.sort();
        let mut order = Vec::with_capacity(self.touched.len() + 3);
        order.push(self.origin);
        order.extend(self.touched);
        order.push(Property::DischargeArea);
        order.push(Property::IsSaturated);
        order
    }
}

/// 반응형 사이징 엔진.
///
/// 모든 setter는 동기적으로 연쇄를 정착시킨 뒤 반환한다. 물성 제공자 오류와
/// 범위 밖 계산은 해당 물리량의 NaN으로만 드러나며 호출자에게 전파되지 않는다.
#[derive(Debug)]
pub struct ValveSizingEngine<P> {
    provider: P,
    grid: Arc<CorrectionFactorGrid>,
    settings: EngineSettings,
    state: ValveSizingState,
    manual_enthalpy: Option<ManualEnthalpy>,
    subscribers: Subscribers,
}

impl<P: SteamPropertyProvider> ValveSizingEngine<P> {
    pub fn new(grid: impl Into<Arc<CorrectionFactorGrid>>, provider: P) -> Self {
        Self::with_settings(grid, provider, EngineSettings::default())
    }

    pub fn with_settings(
        grid: impl Into<Arc<CorrectionFactorGrid>>,
        provider: P,
        settings: EngineSettings,
    ) -> Self {
        Self {
            provider,
            grid: grid.into(),
            state: ValveSizingState::new(&settings),
            settings,
            manual_enthalpy: None,
            subscribers: Subscribers::default(),
        }
    }

    pub fn state(&self) -> &ValveSizingState {
        &self.state
    }

    /// 수동 엔탈피 토큰이 아직 소비되지 않았는지 여부. 정착된 상태에서는 항상 false다.
    pub fn enthalpy_set_manually(&self) -> bool {
        self.manual_enthalpy.is_some()
    }

    /// 변경 알림 구독. 핸들러는 이벤트의 공유 참조만 받으므로 연쇄 중 엔진을 바꿀 수 없다.
    pub fn subscribe(&mut self, handler: impl FnMut(&ChangeEvent) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ---------------- 공개 setter ----------------

    pub fn set_temperature(&mut self, value_c: f64) {
        let mut cascade = Cascade::new(Property::Temperature);
        self.apply_temperature(value_c, &mut cascade);
        self.settle(cascade);
    }

    pub fn set_mass_flow(&mut self, value_kg_per_s: f64) {
        let cascade = Cascade::new(Property::MassFlow);
        self.state.mass_flow_kg_per_s = value_kg_per_s;
        self.settle(cascade);
    }

    pub fn set_upstream_pressure(&mut self, value_bar_abs: f64) {
        let mut cascade = Cascade::new(Property::UpstreamPressure);
        self.apply_upstream_pressure(value_bar_abs, &mut cascade);
        self.settle(cascade);
    }

    pub fn set_set_pressure(&mut self, value_bar_g: f64) {
        let mut cascade = Cascade::new(Property::SetPressure);
        self.state.set_pressure_bar_g = value_bar_g;
        let upstream = self.upstream_from_set_pressure(value_bar_g);
        cascade.touch(Property::UpstreamPressure);
        self.apply_upstream_pressure(upstream, &mut cascade);
        self.recompute_enthalpy_from_temperature(&mut cascade);
        self.settle(cascade);
    }

    /// 수동 엔탈피 입력. 유한하지 않은 값이면 미설정 값(0)을 저장한다.
    pub fn set_enthalpy(&mut self, value_kj_per_kg: f64) {
        let mut cascade = Cascade::new(Property::Enthalpy);
        self.apply_enthalpy(value_kj_per_kg, EnthalpySource::Manual, &mut cascade);
        self.settle(cascade);
    }

    /// 상류 압력의 포화온도로 온도를 맞추고 이번 연쇄의 상태를 포화로 고정한다.
    pub fn set_saturation_temperature(&mut self) {
        let mut cascade = Cascade::new(Property::Temperature);
        let p = self.state.upstream_pressure_bar_abs;
        let t_sat = degrade("tsat_p", self.provider.tsat_p(p));
        self.apply_temperature(t_sat, &mut cascade);
        cascade.forced_phase = Some(PhaseState::Saturated);
        self.settle(cascade);
    }

    /// 표시/수동 덮어쓰기용 직접 저장. 재계산 연쇄를 일으키지 않고 면적 알림 하나만 보낸다.
    pub fn set_discharge_area(&mut self, value_mm2: f64) {
        self.state.discharge_area_mm2 = value_mm2;
        self.publish(Property::DischargeArea);
    }

    pub fn set_kd(&mut self, value: f64) {
        let cascade = Cascade::new(Property::Kd);
        self.state.kd = value;
        self.settle(cascade);
    }

    pub fn set_kb(&mut self, value: f64) {
        let cascade = Cascade::new(Property::Kb);
        self.state.kb = value;
        self.settle(cascade);
    }

    pub fn set_kc(&mut self, value: f64) {
        let cascade = Cascade::new(Property::Kc);
        self.state.kc = value;
        self.settle(cascade);
    }

    /// 현재 상태로 계산한 요구 면적 [mm²].
    pub fn compute_discharge_area(&self) -> f64 {
        let s = &self.state;
        let inputs = SizingInputs {
            mass_flow_lb_per_h: kg_per_s_to_lb_per_h(s.mass_flow_kg_per_s),
            upstream_pressure_psia: bar_abs_to_psia(s.upstream_pressure_bar_abs),
            kd: s.kd,
            kb: s.kb,
            kc: s.kc,
            kn: s.kn,
            ksh: s.ksh,
        };
        square_inch_to_square_mm(required_area_sq_in(&inputs))
    }

    // ---------------- 연쇄 단계 ----------------

    fn upstream_from_set_pressure(&self, set_bar_g: f64) -> f64 {
        let atm_bar = convert_pressure(
            self.settings.atmospheric_pressure_kpa,
            PressureUnit::KiloPascal,
            PressureUnit::Bar,
        );
        (set_bar_g + atm_bar) * self.settings.allowable_overpressure
    }

    fn apply_upstream_pressure(&mut self, value_bar_abs: f64, cascade: &mut Cascade) {
        self.state.upstream_pressure_bar_abs = value_bar_abs;
        self.state.kn = kn_factor(bar_abs_to_psia(value_bar_abs));
        cascade.touch(Property::Kn);
        self.recompute_ksh(cascade);
    }

    fn apply_temperature(&mut self, value_c: f64, cascade: &mut Cascade) {
        self.state.temperature_c = value_c;
        cascade.touch(Property::Temperature);
        self.recompute_ksh(cascade);
        if self.manual_enthalpy.take().is_some() {
            debug!(temperature_c = value_c, "수동 엔탈피 입력으로 h(p,T) 재계산 생략");
        } else {
            self.recompute_enthalpy_from_temperature(cascade);
        }
    }

    fn apply_enthalpy(&mut self, value: f64, source: EnthalpySource, cascade: &mut Cascade) {
        cascade.touch(Property::Enthalpy);
        if !value.is_finite() {
            // 건도도 무효.
            self.state.enthalpy_kj_per_kg = ENTHALPY_UNSET;
            self.state.vapour_quality = f64::NAN;
            cascade.touch(Property::VapourQuality);
            return;
        }
        self.state.enthalpy_kj_per_kg = value;
        let p = self.state.upstream_pressure_bar_abs;
        self.state.vapour_quality = degrade("x_ph", self.provider.x_ph(p, value));
        cascade.touch(Property::VapourQuality);
        if source == EnthalpySource::Manual {
            self.manual_enthalpy = Some(ManualEnthalpy);
            let t = degrade("t_ph", self.provider.t_ph(p, value));
            self.apply_temperature(t, cascade);
        }
    }

    fn recompute_ksh(&mut self, cascade: &mut Cascade) {
        self.state.ksh = self.grid.lookup_si(
            self.state.upstream_pressure_bar_abs,
            self.state.temperature_c,
        );
        cascade.touch(Property::Ksh);
    }

    fn recompute_enthalpy_from_temperature(&mut self, cascade: &mut Cascade) {
        let h = degrade(
            "h_pt",
            self.provider.h_pt(
                self.state.upstream_pressure_bar_abs,
                self.state.temperature_c,
            ),
        );
        self.apply_enthalpy(h, EnthalpySource::Derived, cascade);
    }

    /// 공통 꼬리: 면적, 상태 판정, 알림.
    fn settle(&mut self, cascade: Cascade) {
        self.state.discharge_area_mm2 = self.compute_discharge_area();
        let phase = cascade.forced_phase.unwrap_or_else(|| {
            classify(self.state.enthalpy_kj_per_kg, self.state.vapour_quality)
        });
        self.state.is_saturated = phase == PhaseState::Saturated;
        debug!(
            origin = %cascade.origin,
            area_mm2 = self.state.discharge_area_mm2,
            ?phase,
            "연쇄 정착"
        );
        for property in cascade.notification_order() {
            self.publish(property);
        }
    }

    fn publish(&mut self, property: Property) {
        let event = ChangeEvent {
            property,
            value: self.state.value(property),
        };
        trace!(property = %property, value = %event.value, "변경 알림");
        self.subscribers.publish(&event);
    }
}

/// 제공자 결과를 값으로 바꾼다. 오류나 비유한 값은 NaN.
fn degrade(operation: &'static str, result: Result<f64, PropertyError>) -> f64 {
    match result {
        Ok(v) if v.is_finite() => v,
        Ok(v) => {
            debug!(operation, value = v, "물성 결과가 유한하지 않음");
            f64::NAN
        }
        Err(err) => {
            debug!(operation, %err, "물성 조회 실패");
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_orders_origin_then_canonical_then_tail() {
        let mut c = Cascade::new(Property::Enthalpy);
        c.touch(Property::Ksh);
        c.touch(Property::Temperature);
        c.touch(Property::Enthalpy);
        c.touch(Property::VapourQuality);
        c.touch(Property::Ksh);
        assert_eq!(
            c.notification_order(),
            vec![
                Property::Enthalpy,
                Property::Temperature,
                Property::VapourQuality,
                Property::Ksh,
                Property::DischargeArea,
                Property::IsSaturated,
            ]
        );
    }

    #[test]
    fn degrade_maps_errors_and_non_finite_to_nan() {
        assert_eq!(degrade("h_pt", Ok(2800.0)), 2800.0);
        assert!(degrade("h_pt", Ok(f64::INFINITY)).is_nan());
        assert!(degrade("h_pt", Err(PropertyError::OutOfRange("x"))).is_nan());
    }
}
