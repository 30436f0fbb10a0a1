use serde::{Deserialize, Serialize};

/// 면적 단위. 내부 기준은 제곱밀리미터이다 (오리피스 면적 규모).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    SquareInch,
}

// 1 in = 25.4 mm (정의값)
const MM2_PER_IN2: f64 = 645.16;

fn to_square_mm(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value,
        AreaUnit::SquareCentimeter => value * 100.0,
        AreaUnit::SquareMeter => value * 1.0e6,
        AreaUnit::SquareInch => value * MM2_PER_IN2,
    }
}

fn from_square_mm(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value,
        AreaUnit::SquareCentimeter => value / 100.0,
        AreaUnit::SquareMeter => value / 1.0e6,
        AreaUnit::SquareInch => value / MM2_PER_IN2,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    from_square_mm(to_square_mm(value, from), to)
}

impl AreaUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMillimeter => "mm²",
            AreaUnit::SquareCentimeter => "cm²",
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareInch => "in²",
        }
    }
}
