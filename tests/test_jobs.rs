//! Integration tests for background jobs, reaping and killbg

#[path = "common/mod.rs"]
mod common;
use common::{reap_until, serial, signals, spawn_background};
use common::{Launched, Outcome, Shell, ShellConfig};
use std::thread;
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_secs(10);

#[test]
fn test_background_job_lifecycle() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let pid = spawn_background(&mut shell, "sleep 0.2 &");
    assert!(shell.jobs().contains(pid));
    assert_eq!(shell.jobs().snapshot(), vec![pid]);

    let reaped = reap_until(shell.jobs(), TIMEOUT, |r| r.contains(&pid));
    assert!(reaped.contains(&pid));
    assert!(!shell.jobs().contains(pid));
    assert!(shell.jobs().is_empty());
}

#[test]
fn test_attached_marker_runs_in_background() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let pid = spawn_background(&mut shell, "sleep 0.1&");
    assert!(shell.jobs().contains(pid));

    reap_until(shell.jobs(), TIMEOUT, |r| r.contains(&pid));
    assert!(shell.jobs().is_empty());
}

#[test]
fn test_burst_of_exits_reaped_in_one_pass() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let pids: Vec<u32> = (0..3)
        .map(|_| spawn_background(&mut shell, "true &"))
        .collect();
    assert_eq!(shell.jobs().len(), 3);

    // Let all three exit before a single reap
    thread::sleep(Duration::from_millis(500));
    let all_reaped = |r: &[u32]| pids.iter().all(|p| r.contains(p));
    let reaped = reap_until(shell.jobs(), TIMEOUT, all_reaped);

    for pid in &pids {
        assert!(reaped.contains(pid), "pid {} was not reaped", pid);
    }
    assert!(shell.jobs().is_empty());
}

#[test]
fn test_foreground_command_leaves_jobs_tracked() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let pid = spawn_background(&mut shell, "sleep 0.5 &");
    let outcome = shell.try_eval_line("true").unwrap();
    assert!(matches!(
        outcome,
        Outcome::Launched(Launched::Foreground(_))
    ));
    assert!(shell.jobs().contains(pid));

    reap_until(shell.jobs(), TIMEOUT, |r| r.contains(&pid));
    assert!(shell.jobs().is_empty());
}

#[test]
fn test_killbg_interrupts_running_jobs() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let first = spawn_background(&mut shell, "sleep 30 &");
    let second = spawn_background(&mut shell, "sleep 30 &");
    assert_eq!(shell.jobs().len(), 2);

    shell.try_eval_line("killbg").unwrap();
    assert!(shell.jobs().is_empty());

    // Both die from SIGINT long before their 30 seconds are up
    let both_reaped = |r: &[u32]| r.contains(&first) && r.contains(&second);
    let reaped = reap_until(shell.jobs(), TIMEOUT, both_reaped);
    assert!(reaped.contains(&first));
    assert!(reaped.contains(&second));
}

#[test]
fn test_killbg_with_exit_during_iteration() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let pids: Vec<u32> = (0..3)
        .map(|_| spawn_background(&mut shell, "sleep 30 &"))
        .collect();
    let reaper = shell.jobs().clone();
    let mut reaped_midway = Vec::new();

    let signalled = shell.jobs().kill_all(|pid| {
        signals::interrupt_process(pid).unwrap();
        if pid == pids[0] {
            // First child dies and is reaped while killbg is still going
            reaped_midway = reap_until(&reaper, TIMEOUT, |r| r.contains(&pid));
        }
    });

    assert_eq!(signalled, 3);
    assert!(reaped_midway.contains(&pids[0]));
    assert!(shell.jobs().is_empty());

    let rest_reaped = |r: &[u32]| r.contains(&pids[1]) && r.contains(&pids[2]);
    let rest = reap_until(shell.jobs(), TIMEOUT, rest_reaped);
    assert!(rest.contains(&pids[1]));
    assert!(rest.contains(&pids[2]));
}

#[test]
fn test_killbg_empty_registry_is_noop() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    shell.try_eval_line("killbg").unwrap();
    assert!(shell.jobs().is_empty());
}

#[test]
fn test_missing_program_does_not_block() {
    let _guard = serial();
    let mut shell = Shell::new(ShellConfig::default());

    let start = Instant::now();
    let err = shell.try_eval_line("mysh-no-such-program arg").unwrap_err();
    assert_eq!(err.to_string(), "mysh-no-such-program: command not found");
    assert!(start.elapsed() < TIMEOUT);

    let err = shell.try_eval_line("mysh-no-such-program &").unwrap_err();
    assert!(err.to_string().contains("command not found"));
    assert!(shell.jobs().is_empty());
}
