use std::process::Command;

fn glade() -> Command {
    Command::new(env!("CARGO_BIN_EXE_glade"))
}

#[test]
fn scripted_run_prints_banner_and_summary() {
    let output = glade()
        .args([
            "--seed",
            "11",
            "--unpaced",
            "--script",
            "right*5,slot2,attack,regen,quit,left",
        ])
        .output()
        .expect("glade binary runs");

    assert!(output.status.success(), "glade exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("Welcome to Glade.\n"));
    assert!(stdout.contains("equipped Mace from slot 2"));
    assert!(stdout.contains("cooldown started (60 ticks)"));
    assert!(stdout.contains("world 1 installed from seed"));
    assert!(stdout.contains("ran 9 ticks (quit), seed 11, generation 1"));
}

#[test]
fn tick_limit_stops_an_idle_run() {
    let output = glade()
        .args(["--seed", "3", "--unpaced", "--ticks", "4", "--print-map"])
        .output()
        .expect("glade binary runs");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("ran 4 ticks (stopped), seed 3, generation 0"));
    let map_rows = stdout
        .lines()
        .filter(|line| line.len() == 25 && line.chars().all(|c| ".~,@ExCc".contains(c)))
        .count();
    assert_eq!(map_rows, 40, "two 20-row maps are printed");
}

#[test]
fn malformed_script_fails() {
    let output = glade()
        .args(["--seed", "1", "--unpaced", "--script", "left,jump"])
        .output()
        .expect("glade binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("invalid intent script"));
}

#[test]
fn missing_config_file_fails() {
    let output = glade()
        .args(["--config", "/nonexistent/glade.toml", "--unpaced", "--ticks", "1"])
        .output()
        .expect("glade binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("failed to read config file"));
}
