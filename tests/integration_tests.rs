use bikeshare_processor::config::PipelineSettings;
use bikeshare_processor::models::{CategoryField, DailyRecord, HourlyRecord};
use bikeshare_processor::processors::{
    IntegrityChecker, Pipeline, ProfileAggregator, Reconciler, RollupAggregator,
};
use bikeshare_processor::readers::RecordLoader;
use bikeshare_processor::ProcessingError;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::TempDir;

const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,0.189405,0.437273,0.248309,120,1229,1349
4,2011-01-17,1,0,1,1,1,0,2,0.175833,0.176771,0.5375,0.194017,117,883,1000
";

const HOUR_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16
2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40
3,2011-01-02,1,0,1,0,0,0,0,2,0.46,0.4545,0.88,0.2985,4,13,17
4,2011-01-03,1,0,1,0,0,1,1,1,0.22,0.197,0.44,0.3582,0,5,5
5,2011-01-03,1,0,1,1,0,1,1,1,0.2,0.1667,0.44,0.4179,0,2,2
6,2011-01-04,1,0,1,0,0,2,1,1,0.16,0.1818,0.55,0.1045,0,5,5
";

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
}

#[tokio::test]
async fn test_files_to_dashboard() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let day_path = temp_dir.path().join("day.csv");
    let hour_path = temp_dir.path().join("hour.csv");
    std::fs::File::create(&day_path)
        .and_then(|mut f| f.write_all(DAY_CSV.as_bytes()))
        .unwrap();
    std::fs::File::create(&hour_path)
        .and_then(|mut f| f.write_all(HOUR_CSV.as_bytes()))
        .unwrap();

    let settings = PipelineSettings {
        day_path,
        hour_path,
        ..PipelineSettings::default()
    };
    let (daily, hourly) = settings
        .concurrent_reader()
        .read_datasets(&settings.day_path, &settings.hour_path)
        .await
        .unwrap();

    let data = Pipeline::new().run(&daily, &hourly);

    assert_eq!(data.summary.total_days, 4);
    assert_eq!(data.summary.total_rentals, 985 + 801 + 1349 + 1000);

    let hours: Vec<u8> = data.hourly_profile.iter().map(|p| p.hour).collect();
    assert_eq!(hours, vec![0, 1]);
    assert_eq!(data.hourly_profile[1].mean_cnt, 21.0);

    let merged_dates: Vec<NaiveDate> = data.merged.iter().map(|m| m.date).collect();
    assert_eq!(merged_dates, vec![date(1), date(2), date(3)]);
    assert_eq!(data.join_report.daily_only, vec![date(17)]);
    assert_eq!(data.join_report.rollup_only, vec![date(4)]);

    assert_eq!(data.merged[0].cnt_day, 985);
    assert_eq!(data.merged[0].cnt_hour, 56);
    assert_eq!(data.merged[0].casual_hour, 11);
    assert_eq!(data.merged[0].registered_hour, 45);

    assert_eq!(data.holiday_profile.get(1).unwrap(), 1000.0);
    assert_eq!(data.workingday_profile.get(1).unwrap(), 1349.0);

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["merged"][0]["cnt_day"], serde_json::json!(985));
    assert_eq!(json["merged"][0]["date"], serde_json::json!("2011-01-01"));
}

#[test]
fn test_rollup_scenario() {
    let loader = RecordLoader::new();
    let hourly = loader
        .load_hourly(
            "dteday,hr,season,workingday,holiday,temp,atemp,hum,windspeed,casual,registered,cnt\n\
             2024-01-01,0,1,1,0,0.2,0.2,0.5,0.1,2,3,5\n\
             2024-01-01,1,1,1,0,0.4,0.4,0.5,0.1,1,6,7\n"
                .as_bytes(),
        )
        .unwrap();

    let rollup = RollupAggregator::new().rollup(&hourly);

    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(rollup[0].cnt, 12);
    assert_eq!(rollup[0].casual, 3);
    assert_eq!(rollup[0].registered, 9);
    assert!((rollup[0].temp - 0.3).abs() < 1e-9);
    assert_eq!(rollup[0].casual + rollup[0].registered, rollup[0].cnt);
}

#[test]
fn test_merge_scenario_across_date_formats() {
    let loader = RecordLoader::new();
    let daily = loader
        .load_daily(
            "dteday,season,workingday,holiday,temp,atemp,hum,windspeed,casual,registered,cnt\n\
             01/01/2024,1,0,1,0.3,0.3,0.5,0.1,3,9,12\n\
             01/02/2024,1,1,0,0.3,0.3,0.5,0.1,5,5,10\n"
                .as_bytes(),
        )
        .unwrap();
    let hourly = loader
        .load_hourly(
            "dteday,hr,season,workingday,holiday,temp,atemp,hum,windspeed,casual,registered,cnt\n\
             2024-01-01 00:00:00,0,1,0,1,0.2,0.2,0.5,0.1,2,3,5\n\
             2024-01-03,0,1,1,0,0.4,0.4,0.5,0.1,1,6,7\n"
                .as_bytes(),
        )
        .unwrap();

    let rollup = RollupAggregator::new().rollup(&hourly);
    let merged = Reconciler::new().merge(&daily, &rollup);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert!(merged.len() <= daily.len().min(rollup.len()));
}

#[test]
fn test_profiles_never_invent_categories() {
    let daily: Vec<DailyRecord> = RecordLoader::new()
        .load_daily(
            "dteday,season,workingday,holiday,temp,atemp,hum,windspeed,casual,registered,cnt\n\
             2024-01-01,1,1,0,0.3,0.3,0.5,0.1,3,9,12\n"
                .as_bytes(),
        )
        .unwrap();

    let profile = ProfileAggregator::new().category_profile(&daily, CategoryField::Holiday);

    assert_eq!(profile.get(0).unwrap(), 12.0);
    assert!(matches!(
        profile.get(1),
        Err(ProcessingError::MissingCategory { category: 1, .. })
    ));
}

#[test]
fn test_pipeline_idempotence() {
    let pipeline = Pipeline::new();
    let first = pipeline
        .run_from_readers(DAY_CSV.as_bytes(), HOUR_CSV.as_bytes())
        .unwrap();
    let second = pipeline
        .run_from_readers(DAY_CSV.as_bytes(), HOUR_CSV.as_bytes())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_integrity_report_on_sample_data() {
    let loader = RecordLoader::new();
    let daily = loader.load_daily(DAY_CSV.as_bytes()).unwrap();
    let hourly: Vec<HourlyRecord> = loader.load_hourly(HOUR_CSV.as_bytes()).unwrap();
    let data = Pipeline::new().run(&daily, &hourly);

    let report = IntegrityChecker::new().check(&daily, &hourly, &data.merged);

    // The hourly sample covers only part of each day
    assert_eq!(report.merged_records, 3);
    assert_eq!(
        report.count_of(bikeshare_processor::processors::ViolationType::RollupDivergence),
        3
    );
    assert_eq!(
        report.count_of(bikeshare_processor::processors::ViolationType::CountMismatch),
        0
    );
}
