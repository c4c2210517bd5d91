use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/sample1.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("#b.A.@.a#"))
        .stdout(str::contains("Start position: (1, 5)"))
        .stdout(str::contains("Shortest path: a, b"))
        .stdout(str::contains("Distance: 8"));
}

#[test]
fn part1_brute_strategy_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/sample2.txt").arg("--strategy").arg("brute");

    cmd.assert()
        .success()
        .stdout(str::contains("Shortest path: a, b, c, d, e, f"))
        .stdout(str::contains("Distance: 86"));
}

#[test]
fn part1_graph_strategy_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/sample4.txt").arg("-s").arg("graph");

    cmd.assert().success().stdout(str::contains("Distance: 136"));
}

#[test]
fn part1_missing_input_exits_with_usage() {
    let mut cmd = Command::cargo_bin("part1").unwrap();

    cmd.assert()
        .failure()
        .code(1)
        .stderr(str::contains("Usage"));
}

#[test]
fn part1_rejects_ragged_map() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/ragged.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Expect 7 column(s) in each row, given 6 in line 2."));
}

#[test]
fn part1_rejects_map_without_start() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/no_start.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("No start position in map."));
}

#[test]
fn part1_reports_missing_file() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/not_there.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to open given file"));
}
