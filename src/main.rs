use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use steam_relief_sizing::app::{self, InletCondition, SizeRequest};
use steam_relief_sizing::config::{self, DEFAULT_CONFIG_PATH};
use steam_relief_sizing::conversion;
use steam_relief_sizing::sizing::kn_factor;
use steam_relief_sizing::ui_cli;
use steam_relief_sizing::units::{convert_pressure, convert_temperature, PressureUnit, TemperatureUnit};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "steam_relief_sizing")]
#[command(about = "API 520 증기 안전밸브 오리피스 사이징", long_about = None)]
struct Cli {
    /// 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 입력값으로 요구 분출 면적을 한 번에 계산
    Size(SizeArgs),
    /// KSH/KN 보정계수 조회
    Ksh {
        /// 상류 분출 압력 (절대압)
        #[arg(long)]
        pressure: f64,
        /// 입구 온도
        #[arg(long)]
        temperature: f64,
        /// 압력 단위 (bar, kPa, MPa, psi)
        #[arg(long, default_value = "bar")]
        pressure_unit: String,
        /// 온도 단위 (C, F, K)
        #[arg(long, default_value = "C")]
        temperature_unit: String,
    },
    /// 값을 하나씩 바꿔 가며 결과를 확인
    Interactive,
}

#[derive(Args)]
struct SizeArgs {
    /// 설정 압력 [bar(g)]
    #[arg(long)]
    set_pressure: f64,
    /// 요구 분출 유량 [kg/s]
    #[arg(long)]
    mass_flow: f64,
    /// 입구 온도 [°C]
    #[arg(long, conflicts_with_all = ["enthalpy", "saturated"])]
    temperature: Option<f64>,
    /// 입구 비엔탈피 [kJ/kg]
    #[arg(long, conflicts_with = "saturated")]
    enthalpy: Option<f64>,
    /// 포화 증기로 계산
    #[arg(long)]
    saturated: bool,
    #[arg(long)]
    kd: Option<f64>,
    #[arg(long)]
    kb: Option<f64>,
    #[arg(long)]
    kc: Option<f64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택된 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    match cli.command {
        Commands::Size(args) => {
            let inlet = match (args.temperature, args.enthalpy, args.saturated) {
                (Some(t), _, _) => InletCondition::Temperature(t),
                (None, Some(h), _) => InletCondition::Enthalpy(h),
                _ => InletCondition::Saturated,
            };
            let request = SizeRequest {
                set_pressure_bar_g: args.set_pressure,
                mass_flow_kg_per_s: args.mass_flow,
                inlet,
                kd: args.kd,
                kb: args.kb,
                kc: args.kc,
            };
            let state = app::run_size(&cfg, &request)?;
            ui_cli::print_state(&state, &cfg.display);
        }
        Commands::Ksh {
            pressure,
            temperature,
            pressure_unit,
            temperature_unit,
        } => {
            let p_unit = conversion::parse_pressure_unit(&pressure_unit)?;
            let t_unit = conversion::parse_temperature_unit(&temperature_unit)?;
            let p_psia = convert_pressure(pressure, p_unit, PressureUnit::Psi);
            let t_f = convert_temperature(temperature, t_unit, TemperatureUnit::Fahrenheit);
            let grid = cfg.load_grid()?;
            println!("P1 = {p_psia:.2} psia, T = {t_f:.1} °F");
            println!("KSH = {:.4}", grid.lookup(p_psia, t_f));
            println!("KN  = {:.4}", kn_factor(p_psia));
        }
        Commands::Interactive => app::run_interactive(&cfg)?,
    }
    Ok(())
}
