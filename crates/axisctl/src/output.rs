//! Output formatting for CLI responses

use crate::simulate::{RunResult, RunSummary};
use anyhow::Error;
use axisdrive_engine::ControllerConfig;
use colored::*;
use serde::Serialize;
use serde_json::json;

/// Print a value as pretty JSON wrapped in a success envelope.
pub fn print_json_success<T: Serialize>(key: &str, value: &T) {
    let output = json!({ "success": true, key: value });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "causes": chain,
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

/// Print the result of a run.
pub fn print_run(result: &RunResult, json: bool) {
    if json {
        print_json_success("run", result);
        return;
    }

    print_summary_human(&result.summary);
    if !result.samples.is_empty() {
        println!();
        println!(
            "{:>8} {:>10} {:>12} {:>10} {:>10} {:>10}",
            "t [s]", "pos [deg]", "vel [deg/s]", "cmd [A]", "draw [A]", "tq [Nm]"
        );
        for sample in &result.samples {
            let line = format!(
                "{:>8.3} {:>10.3} {:>12.3} {:>10.3} {:>10.3} {:>10.3}",
                sample.time_s,
                sample.position,
                sample.velocity,
                sample.report.commanded_current,
                sample.report.current_draw,
                sample.report.output_torque
            );
            if sample.report.saturated {
                println!("{} {}", line, "sat".yellow());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn print_summary_human(summary: &RunSummary) {
    println!("{}", "Simulation summary".bold());
    println!("  Mode:            {}", summary.mode.to_string().cyan());
    println!("  Ticks:           {} ({:.3} s)", summary.ticks, summary.duration_s);
    println!("  Final position:  {:.4} deg", summary.final_position);
    println!("  Final velocity:  {:.4} deg/s", summary.final_velocity);
    println!("  Peak velocity:   {:.3} deg/s", summary.peak_velocity);
    println!("  Peak current:    {:.3} A", summary.peak_current);
    println!("  Peak torque:     {:.3} Nm", summary.peak_torque);

    let saturated = format!("{} ticks", summary.saturated_ticks);
    if summary.saturated_ticks > 0 {
        println!("  Saturated:       {}", saturated.yellow());
    } else {
        println!("  Saturated:       {}", saturated.green());
    }

    match summary.converged_at_s {
        Some(t) => println!("  Converged at:    {}", format!("{t:.3} s").green()),
        None if summary.mode.is_position() => {
            println!("  Converged at:    {}", "not converged".red())
        }
        None => {}
    }
}

/// Print the outcome of validating a configuration.
pub fn print_validation(path: &str, config: &ControllerConfig, json: bool) {
    if json {
        print_json_success("config", config);
        return;
    }
    println!("{} {}", "✓".green().bold(), path);
    println!("  Mode:     {}", config.mode);
    println!(
        "  Setpoint: {} {}",
        config.setpoint,
        config.mode.setpoint_unit()
    );
    println!(
        "  Motor:    {:.1} A nominal, {:.0} rpm no-load, {:.0}:1 gear",
        config.motor.nominal_current, config.motor.no_load_speed, config.motor.gear_ratio
    );
    if let Some(signal) = &config.signal {
        println!(
            "  Signal:   {:?} {} @ {} Hz",
            signal.waveform, signal.amplitude, signal.frequency_hz
        );
    }
}
