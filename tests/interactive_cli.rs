use std::process::ExitCode;

use clap::Parser;

use car_ranking::cli::{Cli, run};

const FIXTURE: &str = "tests/fixtures/cars.csv";

fn session_output(args: &[&str], script: &str) -> (ExitCode, String) {
    let cli = Cli::parse_from(std::iter::once("car-ranking").chain(args.iter().copied()));
    let mut out = Vec::new();
    let code = run(&cli, script.as_bytes(), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn ranks_a_brand_by_price_and_exits() {
    let (code, out) = session_output(&[FIXTURE], "4\n\n\n1\nn\n");

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.contains("Note: Skipped 4 rows due to invalid data"));
    assert!(out.contains("Successfully loaded 8 cars from 4 brands"));
    assert!(out.contains(" 4. Toyota"));
    assert!(out.contains("Found 2 clean vehicles for Toyota"));
    assert!(out.contains("Price range: $12,000 - $15,000"));
    assert!(out.contains("Year range: 2018 - 2020"));
    assert!(out.contains("Top 2 cars from 'Toyota' ranked by Price (Low to High):"));

    let corolla = out.find(" 1. Corolla (2018)").unwrap();
    let camry = out.find(" 2. Camry (2020)").unwrap();
    assert!(corolla < camry);
    assert!(out.contains("Summary: 2 cars, Average price: $13,500, Price range: $12,000 - $15,000"));
    assert!(out.trim_end().ends_with("Thank you for using the Car Ranking System!"));
}

#[test]
fn statistics_entry_lists_clean_brands_only() {
    let (code, out) = session_output(&[FIXTURE], "5\nq\n");

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.contains("Brand Statistics:"));
    assert!(out.contains("$13,500"));
    assert!(out.contains("$28,500"));
    let stats = &out[out.find("Brand Statistics:").unwrap()..];
    assert!(!stats.contains("Dodge"));
}

#[test]
fn invalid_inputs_are_reported_and_the_loop_continues() {
    let (code, out) = session_output(&[FIXTURE], "0\nford\n3\nabc\n2017\n9\n2\ny\nq\n");

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.contains("Invalid choice. Please select a number between 1 and 4."));
    assert!(out.contains("Invalid input. Please enter a number or 'q' to quit."));
    assert!(out.contains("Invalid price entered, skipping price filter"));
    assert!(out.contains("Filtered to 1 cars from 2017 or newer"));
    assert!(out.contains("Top 1 cars from 'Ford' ranked by Year (Newest First):"));
    assert!(out.contains(" 1. Mustang (2021)"));
    assert!(!out.contains("Summary:"));
    assert_eq!(out.matches("Select a brand (1-4) or 'q' to quit: ").count(), 4);
}

#[test]
fn price_ceiling_feedback_and_overflow_count() {
    let (_, out) = session_output(&[FIXTURE, "--limit", "1"], "3\n25000\n\n3\nn\n");

    assert!(out.contains("Filtered to 2 cars under $25,000"));
    assert!(out.contains("Top 1 cars from 'Ford' ranked by Mileage (Low to High):"));
    assert!(out.contains(" 1. Mustang (2021)"));
    assert!(out.contains("... and 1 more cars available"));
}

#[test]
fn brand_without_clean_titles_has_no_candidates() {
    let (code, out) = session_output(&[FIXTURE], "2\n");

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.contains("No cars available for the brand 'dodge' with your criteria."));
    assert!(!out.contains("Enter maximum price"));
    assert!(out.contains("Thank you for using the Car Ranking System!"));
}

#[test]
fn filters_that_remove_everything_skip_ranking() {
    let (_, out) = session_output(&[FIXTURE], "4\n1000\nn\n");

    assert!(out.contains("Filtered to 0 cars under $1,000"));
    assert!(!out.contains("Year range:"));
    assert!(out.contains("No cars available for the brand 'toyota' with your criteria."));
    assert!(!out.contains("How would you like to rank the cars?"));
}

#[test]
fn json_output_uses_value_score_order() {
    let (_, out) = session_output(&[FIXTURE, "--json", "--stable-merge"], "1\n\n\n4\nn\n");

    assert!(out.contains("\"method\": \"value\""));
    assert!(out.contains("\"brand\": \"bmw\""));
    let bmw_330i = out.find("\"model\": \"330i\"").unwrap();
    let x5 = out.find("\"model\": \"x5\"").unwrap();
    assert!(bmw_330i < x5);
    assert!(out.contains("\"color\": \"unknown\""));
}

#[test]
fn missing_file_fails_without_entering_the_loop() {
    let (code, out) = session_output(&["tests/fixtures/does_not_exist.csv"], "1\n");

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.contains("Error: Could not find the file 'tests/fixtures/does_not_exist.csv'."));
    assert!(out.contains("Please make sure the file exists in the correct location."));
    assert!(!out.contains("Select a brand"));
}

#[test]
fn file_with_no_valid_rows_fails() {
    let (code, out) = session_output(&["tests/fixtures/all_invalid.csv"], "");

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.contains("Note: Skipped 2 rows due to invalid data"));
    assert!(out.contains("Error: No valid data found in the CSV file."));
}
