//! Integration Test: Sleep Prohibition
//!
//! **Policy**: The widget core MUST NOT sleep, spawn, or measure time with
//! the system clock. Reply delays, the excited hold, and blink ticks are
//! timer-queue entries fired from `update`.
//! **Exceptions**: Frame rate limiting in the TUI event loop, test code.

use architectural_enforcement::{code_part, find_in_production, rust_sources, test_module_start};

/// Test that the core never sleeps or spawns
#[test]
fn test_no_sleep_in_core() {
    let violations = find_in_production(
        "tutor/core/src",
        &["::sleep(", ".sleep(", "spawn(", "Instant::now", "SystemTime::now"],
    );

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking or clock-driven timing in tutor-core!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ Schedule delays on the widget's TimerQueue instead.");

        panic!(
            "\nFound {} timing violation(s) in tutor-core.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Test that the TUI only sleeps to pace frames
#[test]
fn test_tui_sleeps_only_for_frame_limiting() {
    let mut violations = Vec::new();

    for (path, lines) in rust_sources("tui/src") {
        let end = test_module_start(&lines).unwrap_or(lines.len());
        for idx in 0..end {
            let code = code_part(&lines[idx]);
            if !(code.contains("::sleep(") || code.contains(".sleep(")) {
                continue;
            }
            if path.ends_with("tui/src/app.rs") && is_frame_limiting_context(&lines, idx) {
                continue;
            }
            violations.push(format!("{}:{} - {}", path.display(), idx + 1, lines[idx].trim()));
        }
    }

    assert!(
        violations.is_empty(),
        "Sleep outside frame limiting:\n{}",
        violations.join("\n")
    );
}

/// Check if sleep is used for frame rate limiting
fn is_frame_limiting_context(lines: &[String], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    lines[context_range].iter().any(|line| {
        let line = line.to_lowercase();
        line.contains("frame") || line.contains("fps") || line.contains("rate limit")
    })
}

#[test]
fn test_frame_limiting_detection() {
    let code: Vec<String> = [
        "fn render_loop() {",
        "    let frame_duration = Duration::from_millis(100); // 10 FPS",
        "    loop {",
        "        render();",
        "        tokio::time::sleep(frame_duration).await;",
        "    }",
        "}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert!(is_frame_limiting_context(&code, 4));

    let polling: Vec<String> = ["loop {", "    std::thread::sleep(ms(5));", "}"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert!(!is_frame_limiting_context(&polling, 1));
}
