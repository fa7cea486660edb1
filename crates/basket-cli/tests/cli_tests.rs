//! End-to-end tests for the `basket` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const AAA: [f64; 10] = [100.0, 101.0, 99.5, 102.0, 103.5, 102.8, 104.0, 105.2, 104.6, 106.0];
const BBB: [f64; 10] = [50.0, 49.8, 50.4, 50.1, 49.7, 50.6, 51.0, 50.8, 51.3, 51.1];

fn write_series(dir: &Path, symbol: &str, prices: &[f64]) {
    let mut content = String::from("Date,Open,Close,Adj Close\n");
    for (i, price) in prices.iter().enumerate() {
        content.push_str(&format!("2024-01-{:02},0,{price},{price}\n", i + 2));
    }
    fs::write(dir.join(format!("{symbol}.csv")), content).unwrap();
}

struct Fixture {
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let data = home.path().join("data");
        fs::create_dir(&data).unwrap();
        write_series(&data, "AAA", &AAA);
        write_series(&data, "BBB", &BBB);
        write_series(&data, "FLAT", &[100.0; 10]);
        Self { home }
    }

    fn data(&self) -> String {
        self.home.path().join("data").display().to_string()
    }

    fn basket(&self) -> Command {
        let mut cmd = Command::cargo_bin("basket").unwrap();
        cmd.env("BASKET_CONFIG", self.home.path().join("config.json"))
            .env_remove("BASKET_DATA_DIR")
            .env_remove("RUST_LOG")
            .current_dir(self.home.path());
        cmd
    }
}

#[test]
fn test_json_report() {
    let fx = Fixture::new();
    let output = fx
        .basket()
        .args(["--format", "json", "analyze", "-t", "aaa,bbb", "-w", "60,40"])
        .args(["-p", "max", "--data-dir", &fx.data(), "--no-chart"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["symbols"], serde_json::json!(["AAA", "BBB"]));
    assert_eq!(json["start_date"], "2024-01-03");
    assert_eq!(json["end_date"], "2024-01-11");
    assert_eq!(json["holdings"][0]["allocation_pct"], 60.0);
    assert_eq!(json["holdings"][1]["allocation_pct"], 40.0);
    assert_eq!(json["holdings"][0]["total_return_pct"], 6.0);
    assert_eq!(json["portfolio"]["observations"], 9);
    assert!(json["portfolio"]["sharpe_ratio"].is_f64());
    assert!(!fx.home.path().join("portfolio.svg").exists());
}

#[test]
fn test_table_report_writes_chart() {
    let fx = Fixture::new();
    let chart = fx.home.path().join("out.svg");
    fx.basket()
        .args(["analyze", "--tickers", "AAA,BBB", "--data-dir", &fx.data()])
        .arg("--chart")
        .arg(&chart)
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio Performance"))
        .stdout(predicate::str::contains("Sharpe Ratio"))
        .stdout(predicate::str::contains("50.00%"));

    let svg = fs::read_to_string(&chart).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polyline").count(), 3);
}

#[test]
fn test_default_chart_path() {
    let fx = Fixture::new();
    fx.basket()
        .args(["-q", "analyze", "-t", "AAA,BBB", "--data-dir", &fx.data()])
        .assert()
        .success();
    assert!(fx.home.path().join("portfolio.svg").exists());
}

#[test]
fn test_machine_formats_skip_default_chart() {
    let fx = Fixture::new();
    for format in ["json", "csv", "minimal"] {
        fx.basket()
            .args(["-f", format, "analyze", "-t", "AAA,BBB", "--data-dir", &fx.data()])
            .assert()
            .success();
    }
    assert!(!fx.home.path().join("portfolio.svg").exists());
}

#[test]
fn test_json_report_with_explicit_chart() {
    let fx = Fixture::new();
    let chart = fx.home.path().join("basket.svg");
    let output = fx
        .basket()
        .args(["-f", "json", "analyze", "-t", "AAA,BBB", "--data-dir", &fx.data()])
        .arg("--chart")
        .arg(&chart)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(chart.exists());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["symbols"], serde_json::json!(["AAA", "BBB"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("basket.svg"));
}

#[test]
fn test_csv_report() {
    let fx = Fixture::new();
    fx.basket()
        .args(["-f", "csv", "analyze", "-t", "AAA,BBB", "--data-dir", &fx.data(), "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name,allocation_pct,total_return_pct,annualized_return_pct,risk_pct,sharpe_ratio\nPortfolio,100.0,",
        ));
}

#[test]
fn test_minimal_report() {
    let fx = Fixture::new();
    fx.basket()
        .args(["-f", "minimal", "analyze", "-t", "AAA", "--data-dir", &fx.data(), "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Return: 6.00%,"));
}

#[test]
fn test_weight_count_mismatch() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "-t", "AAA,BBB", "-w", "1,2,3", "--data-dir", &fx.data()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid weights"));
}

#[test]
fn test_negative_weight_rejected() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "-t", "AAA,BBB", "-w", "-1,2", "--data-dir", &fx.data()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid weight"));
}

#[test]
fn test_zero_volatility_is_an_error() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "-t", "FLAT", "--data-dir", &fx.data(), "--no-chart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Volatility is zero"));
}

#[test]
fn test_missing_symbol_is_dropped_with_warning() {
    let fx = Fixture::new();
    let output = fx
        .basket()
        .args(["-f", "json", "analyze", "-t", "AAA,ZZZ,BBB", "-w", "1,5,1"])
        .args(["--data-dir", &fx.data(), "--no-chart"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ZZZ"));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["missing"], serde_json::json!(["ZZZ"]));
    assert_eq!(json["holdings"][0]["allocation_pct"], 50.0);
}

#[test]
fn test_no_data_at_all() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "-t", "ZZZ", "--data-dir", &fx.data()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No price data"));
}

#[test]
fn test_unsupported_period() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "-t", "AAA", "-p", "soon", "--data-dir", &fx.data()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported period"));
}

#[test]
fn test_missing_tickers_without_terminal() {
    let fx = Fixture::new();
    fx.basket()
        .args(["analyze", "--data-dir", &fx.data()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tickers"));
}

#[test]
fn test_config_round_trip() {
    let fx = Fixture::new();
    fx.basket()
        .args(["config", "set", "period", "3y"])
        .assert()
        .success();
    fx.basket()
        .args(["-f", "minimal", "config", "get", "default_period"])
        .assert()
        .success()
        .stdout("3y\n");
    fx.basket()
        .args(["config", "reset", "period"])
        .assert()
        .success();
    fx.basket()
        .args(["-f", "minimal", "config", "get", "default_period"])
        .assert()
        .success()
        .stdout("1y\n");
}

#[test]
fn test_config_rejects_invalid_value() {
    let fx = Fixture::new();
    fx.basket()
        .args(["config", "set", "default_format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_settings_supply_defaults() {
    let fx = Fixture::new();
    fx.basket()
        .args(["config", "set", "data_dir", &fx.data()])
        .assert()
        .success();
    fx.basket()
        .args(["config", "set", "default_format", "minimal"])
        .assert()
        .success();
    fx.basket()
        .args(["analyze", "-t", "AAA", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Return: 6.00%,"));
}
