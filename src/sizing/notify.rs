//! 엔진 상태 변경 알림.

use std::fmt;

/// 엔진이 공개하는 물리량. 선언 순서가 알림의 정렬 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Temperature,
    MassFlow,
    SetPressure,
    UpstreamPressure,
    Enthalpy,
    VapourQuality,
    Kd,
    Kb,
    Kc,
    Kn,
    Ksh,
    DischargeArea,
    IsSaturated,
}

impl Property {
    /// 구독자에게 전달되는 고정 이름.
    pub fn name(self) -> &'static str {
        match self {
            Property::Temperature => "temperature",
            Property::MassFlow => "mass_flow",
            Property::SetPressure => "set_pressure",
            Property::UpstreamPressure => "upstream_pressure",
            Property::Enthalpy => "enthalpy",
            Property::VapourQuality => "vapour_quality",
            Property::Kd => "kd",
            Property::Kb => "kb",
            Property::Kc => "kc",
            Property::Kn => "kn",
            Property::Ksh => "ksh",
            Property::DischargeArea => "discharge_area",
            Property::IsSaturated => "is_saturated",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 알림 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Flag(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(v) if v.is_nan() => f.write_str("-"),
            PropertyValue::Number(v) => write!(f, "{v:.4}"),
            PropertyValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// 하나의 정착된 물리량 변경.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeEvent {
    pub property: Property,
    pub value: PropertyValue,
}

/// 구독 해제용 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&ChangeEvent)>;

/// 등록 순서대로 호출되는 구독자 목록.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub(crate) fn publish(&mut self, event: &ChangeEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.handlers.len())
            .finish()
    }
}
