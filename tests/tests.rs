use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

/// The row produced from `small.fa` with `-o 2 -c 7`: seven dimer windows
/// (ac cg gt ta ac cg gt) normalized by the maximum count of two.
fn small_fa_dimer_row() -> String {
    let mut fields = vec!["0.0000"; 16];
    fields[3] = "1.0000"; // GT
    fields[6] = "1.0000"; // AC
    fields[8] = "0.5000"; // TA
    fields[13] = "1.0000"; // CG
    format!("{}\n", fields.join("\t"))
}

#[test]
fn cli_no_args() {
    Command::cargo_bin("oligovec").unwrap().assert().failure();
}

#[test]
fn cli_no_such_file() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["tests/input/no_such_file.fa"])
        .assert()
        .failure()
        .stderr(contains("OpenInput"));
}

#[test]
fn cli_neither_fasta_nor_fastq() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["tests/input/notaformat.txt"])
        .assert()
        .failure()
        .stderr(contains("UnknownFormat"));
}

#[test]
fn cli_oligo_size_out_of_range() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "0", "tests/input/small.fa"])
        .assert()
        .failure()
        .stderr(contains("OligomerSize"));
}

#[test]
fn cli_fasta_single_row() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-t", "1", "-c", "7", "tests/input/small.fa"])
        .assert()
        .success()
        .stdout(small_fa_dimer_row());
}

#[test]
fn cli_gzipped_fasta() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-t", "1", "-c", "7", "tests/input/small.fa.gz"])
        .assert()
        .success()
        .stdout(small_fa_dimer_row());
}

#[test]
fn cli_fastq_single_row() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-t", "1", "-c", "7", "tests/input/reads.fq"])
        .assert()
        .success()
        .stdout(small_fa_dimer_row());
}

#[test]
fn cli_fastq_all_below_minimum_quality() {
    let zeros = format!("{}\n", vec!["0.0000"; 16].join("\t"));
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-t", "1", "-c", "10", "tests/input/lowq.fq"])
        .assert()
        .success()
        .stdout(zeros);
}

#[test]
fn cli_fastq_length_mismatch() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-t", "1", "tests/input/mismatch.fq"])
        .assert()
        .failure()
        .stderr(contains("QualityLengthMismatch"));
}

#[test]
fn cli_header_line() {
    let header = "TT\tCT\tAT\tGT\tTC\tCC\tAC\tGC\tTA\tCA\tAA\tGA\tTG\tCG\tAG\tGG\n";
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "2", "-d", "-t", "0", "tests/input/small.fa"])
        .assert()
        .success()
        .stdout(header);
}

#[test]
fn cli_labelled_rows() {
    let row = "mouse\t1.0000\t1.0000\t1.0000\t1.0000\n";
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&[
            "-o",
            "1",
            "-t",
            "2",
            "-c",
            "4",
            "-l",
            "mouse",
            "tests/input/small.fa",
        ])
        .assert()
        .success()
        .stdout(format!("{}{}", row, row));
}

#[test]
fn cli_merged_complements() {
    Command::cargo_bin("oligovec")
        .unwrap()
        .args(&["-o", "1", "-t", "1", "-c", "4", "-r", "tests/input/small.fa"])
        .assert()
        .success()
        .stdout("1.0000\t1.0000\n");
}
