use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use ticker_analyzer::report::raw_data::DISQUALIFIED_MARKER;
use ticker_analyzer::{
    analyze, dataset, export, run, BatchSummary, CriteriaEngine, Criterion, OutputPaths, RunConfig,
    ScoreReport, Verdict, CRITERIA_COUNT,
};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn scored_dataset() -> Vec<ScoreReport> {
    analyze(&dataset::funds()).expect("embedded dataset is valid")
}

fn verdict(report: &ScoreReport, criterion: Criterion) -> Verdict {
    report.result(criterion).map(|r| r.verdict).unwrap()
}

#[test]
fn every_fund_gets_twenty_results() {
    for report in scored_dataset() {
        assert_eq!(report.results.len(), CRITERIA_COUNT, "{}", report.ticker);
        let order: Vec<Criterion> = report.results.iter().map(|r| r.criterion).collect();
        assert_eq!(order, Criterion::ALL.to_vec());
    }
}

#[test]
fn pvp_below_one_passes_criterion_three() {
    let funds = dataset::funds();
    let reports = scored_dataset();

    for (fund, report) in funds.iter().zip(&reports) {
        let pvp = fund.pvp.unwrap();
        if pvp < 1.0 {
            assert_eq!(verdict(report, Criterion::PriceToBook), Verdict::Pass, "{}", fund.ticker);
        }
    }

    let alzr = reports.iter().find(|r| r.ticker == "ALZR11").unwrap();
    assert_eq!(verdict(alzr, Criterion::PriceToBook), Verdict::Neutral);
}

#[test]
fn pvp_above_limit_disqualifies_regardless_of_other_results() {
    let mut funds = dataset::funds();
    // BTLG11 otherwise passes every check
    let btlg = funds.iter_mut().find(|f| f.ticker == "BTLG11").unwrap();
    btlg.pvp = Some(1.6);

    let reports = analyze(&funds).unwrap();
    let btlg = reports.iter().find(|r| r.ticker == "BTLG11").unwrap();

    assert!(btlg.disqualified);
    assert_eq!(btlg.results.len(), CRITERIA_COUNT);
    assert_eq!(verdict(btlg, Criterion::PriceToBook), Verdict::Disqualify);
    assert_eq!(btlg.passes, 19);
    assert_eq!(btlg.score, 0);
    assert_eq!(reports.iter().filter(|r| r.disqualified).count(), 1);

    let ranked = ticker_analyzer::rank(&reports);
    assert_eq!(ranked.last().map(|r| r.ticker.as_str()), Some("BTLG11"));
}

#[test]
fn hglg11_vacancy_scenario() {
    let funds = dataset::funds();
    let engine = CriteriaEngine::for_funds(&funds);
    let mut hglg = dataset::find("HGLG11").unwrap();

    hglg.vacancy_pct = Some(5.0);
    assert_eq!(engine.check(Criterion::Vacancy, &hglg).verdict, Verdict::Pass);

    hglg.vacancy_pct = Some(15.0);
    assert_eq!(engine.check(Criterion::Vacancy, &hglg).verdict, Verdict::Fail);
}

#[test]
fn reference_scores_for_embedded_dataset() {
    let reports = scored_dataset();
    let score = |ticker: &str| reports.iter().find(|r| r.ticker == ticker).unwrap().score;

    assert_eq!(score("GGRC11"), 20);
    assert_eq!(score("BTLG11"), 20);
    assert_eq!(score("BRCO11"), 20);
    // HGLG11 loses C3 (neutral band) and C6 (below the logistics mean)
    assert_eq!(score("HGLG11"), 18);
    // JURO11 is alone in its sector, so its own yield is the benchmark
    assert_eq!(score("JURO11"), 14);
}

#[test]
fn export_writes_both_dated_files() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("output");
    let reports = scored_dataset();

    let summary = export(&reports, &out_dir, run_date()).unwrap();

    assert_eq!(summary.paths, OutputPaths::for_date(&out_dir, run_date()));
    assert!(out_dir.join("resultado_fiis_2025-06-30.html").is_file());
    assert!(out_dir.join("dados_brutos_fiis_2025-06-30.csv").is_file());

    let html = fs::read_to_string(&summary.paths.html).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("30/06/2025"));

    let csv = fs::read_to_string(&summary.paths.csv).unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("ticker,c1_regioes_nobres,c2_idade_media_anos,c3_pvp,"));
    assert!(header.ends_with(",c20_tem_reserva_1mes,score"));
    assert_eq!(lines.count(), 10);
}

#[test]
fn csv_values_round_trip_to_source_constants() {
    let tmp = TempDir::new().unwrap();
    let funds = dataset::funds();
    let reports = analyze(&funds).unwrap();

    let summary = export(&reports, tmp.path(), run_date()).unwrap();

    let mut rdr = csv::Reader::from_path(&summary.paths.csv).unwrap();
    for (fund, record) in funds.iter().zip(rdr.records()) {
        let record = record.unwrap();
        assert_eq!(&record[0], fund.ticker);
        assert_eq!(record[3].parse::<f64>().unwrap(), fund.pvp.unwrap());
        assert_eq!(record[9].parse::<f64>().unwrap(), fund.years_to_repay_debt.unwrap());
        assert_eq!(record[12].parse::<f64>().unwrap(), fund.cap_rate_pct.unwrap());
        assert_eq!(record[14].parse::<u32>().unwrap(), fund.states_count.unwrap());
        assert_eq!(record[20].parse::<bool>().unwrap(), fund.has_one_month_reserve.unwrap());
    }
}

#[test]
fn rerun_on_same_date_is_byte_identical() {
    let tmp = TempDir::new().unwrap();

    let first = export(&scored_dataset(), tmp.path(), run_date()).unwrap();
    let html_1 = fs::read(&first.paths.html).unwrap();
    let csv_1 = fs::read(&first.paths.csv).unwrap();

    let second = export(&scored_dataset(), tmp.path(), run_date()).unwrap();
    let html_2 = fs::read(&second.paths.html).unwrap();
    let csv_2 = fs::read(&second.paths.csv).unwrap();

    assert_eq!(html_1, html_2);
    assert_eq!(csv_1, csv_2);
    assert_eq!(first.html_sha256, second.html_sha256);
    assert_eq!(first.csv_sha256, second.csv_sha256);
}

#[test]
fn unwritable_output_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not_a_dir");
    fs::write(&blocker, b"occupied").unwrap();

    let err = export(&scored_dataset(), &blocker, run_date()).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to create output directory"));
}

#[test]
fn disqualified_fund_is_marked_in_csv_and_left_out_of_average() {
    let tmp = TempDir::new().unwrap();
    let mut funds = dataset::funds();
    funds[0].vacancy_pct = Some(50.0);
    let btlg = funds.iter_mut().find(|f| f.ticker == "BTLG11").unwrap();
    btlg.pvp = Some(1.6);
    let reports = analyze(&funds).unwrap();

    let summary = export(&reports, tmp.path(), run_date()).unwrap();

    let mut rdr = csv::Reader::from_path(&summary.paths.csv).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    let ggrc = rows.iter().find(|r| &r[0] == "GGRC11").unwrap();
    let btlg = rows.iter().find(|r| &r[0] == "BTLG11").unwrap();

    // both funds pass 19 criteria; only BTLG11 is disqualified
    assert_eq!(&ggrc[21], "19");
    assert_eq!(&btlg[21], DISQUALIFIED_MARKER);

    let qualified: Vec<&ScoreReport> = reports.iter().filter(|r| !r.disqualified).collect();
    let expected = qualified.iter().map(|r| r.passes).sum::<usize>() as f64 / qualified.len() as f64;
    let batch = BatchSummary::from_reports(&reports);
    assert_eq!(batch.disqualified_count, 1);
    assert!((batch.average_score - expected).abs() < 1e-9);
}

#[test]
fn default_run_writes_both_files_for_the_run_date() {
    let tmp = TempDir::new().unwrap();
    let config = RunConfig {
        output_dir: tmp.path().join("output"),
        ..RunConfig::default()
    };

    let summary = run(&config).unwrap();

    assert!(summary.paths.html.is_file());
    assert!(summary.paths.csv.is_file());
    let html_name = summary.paths.html.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = html_name
        .strip_prefix("resultado_fiis_")
        .and_then(|rest| rest.strip_suffix(".html"))
        .unwrap();
    let date = NaiveDate::parse_from_str(stamp, "%Y-%m-%d").unwrap();
    assert_eq!(summary.paths, OutputPaths::for_date(&config.output_dir, date));
}

#[test]
fn pinned_json_run_matches_export() {
    let tmp = TempDir::new().unwrap();
    let config = RunConfig {
        output_dir: tmp.path().to_path_buf(),
        date: Some(run_date()),
        json: true,
        color: false,
    };

    let summary = run(&config).unwrap();
    let direct = export(&scored_dataset(), &tmp.path().join("direct"), run_date()).unwrap();

    assert_eq!(summary.paths, OutputPaths::for_date(tmp.path(), run_date()));
    assert_eq!(summary.html_sha256, direct.html_sha256);
    assert_eq!(summary.csv_sha256, direct.csv_sha256);
}
