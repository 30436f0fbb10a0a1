//! API 520 증기 안전밸브 오리피스 사이징.
//!
//! 핵심은 [`sizing::ValveSizingEngine`]으로, 입력 하나가 바뀔 때마다 의존 물리량을
//! 정해진 순서로 다시 계산하고 요구 분출 면적을 구한다. 증기 물성은
//! [`steam::SteamPropertyProvider`] 뒤에 숨겨 CLI 외의 프런트엔드도 붙일 수 있게 한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod sizing;
pub mod steam;
pub mod ui_cli;
pub mod units;
