use super::*;
use crate::devlog::LogKind;
use crate::settings::{AppSettings, GridStyle, MemoryStorage, SettingsStore, ThemeMode};
use state::{PendingConfirmAction, PersistRequest, SettingsTab};

fn raw_input(time: f64, events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.time = Some(time);
    raw.events = events;
    raw
}

/// Runs one headless frame of the whole app.
fn frame(app: &mut SpecsApp, ctx: &egui::Context, time: f64, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(time, events), |ctx| app.run_frame(ctx));
}

/// Center of the widget registered under `id` in the last frame.
fn widget_center(ctx: &egui::Context, id: &str) -> egui::Pos2 {
    capture::current(ctx)
        .rects()
        .find(|(_, target)| target.id.as_deref() == Some(id))
        .map(|(rect, _)| rect.center())
        .unwrap_or_else(|| panic!("widget {id} was not drawn"))
}

fn has_widget(ctx: &egui::Context, id: &str) -> bool {
    capture::current(ctx)
        .rects()
        .any(|(_, target)| target.id.as_deref() == Some(id))
}

/// Presses and releases the primary button over `pos` across two frames.
fn click(app: &mut SpecsApp, ctx: &egui::Context, time: f64, pos: egui::Pos2) {
    let button = |pressed| egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    };
    frame(app, ctx, time, vec![egui::Event::PointerMoved(pos), button(true)]);
    frame(app, ctx, time + 0.05, vec![button(false)]);
}

#[test]
fn clicking_nav_item_changes_route() {
    let mut app = SpecsApp::default();
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    let target = widget_center(&ctx, "nav-settings");
    click(&mut app, &ctx, 0.1, target);

    assert_eq!(*app.router.current(), Route::Settings);
}

#[test]
fn clicking_category_card_opens_detail() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::Directory);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    assert_eq!(*app.router.current(), Route::Directory);
    frame(&mut app, &ctx, 0.05, vec![]);

    let target = widget_center(&ctx, "card-cpu");
    click(&mut app, &ctx, 0.1, target);

    assert_eq!(*app.router.current(), Route::ComponentDetail("cpu".into()));
}

#[test]
fn list_grid_style_draws_rows() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.grid_style = GridStyle::List);
    app.navigate(&Route::Directory);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    assert!(has_widget(&ctx, "row-cpu"));
    assert!(!has_widget(&ctx, "card-cpu"));
}

#[test]
fn click_capture_logs_label_when_enabled() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.dev_mode = true;
        s.log_interactions = true;
    });
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    let target = widget_center(&ctx, "nav-about");
    click(&mut app, &ctx, 0.1, target);

    let clicks: Vec<_> = app
        .logs
        .entries()
        .filter(|entry| entry.kind == LogKind::Event)
        .collect();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].source, "EVENT");
    assert_eq!(clicks[0].message, "Click: About Project");
}

#[test]
fn click_capture_is_silent_without_developer_mode() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.log_interactions = true);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    let target = widget_center(&ctx, "nav-about");
    click(&mut app, &ctx, 0.1, target);

    assert!(app.logs.entries().all(|entry| entry.kind != LogKind::Event));
}

#[test]
fn click_on_empty_space_logs_unknown() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.dev_mode = true;
        s.log_interactions = true;
    });
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    click(&mut app, &ctx, 0.1, egui::pos2(1190.0, 790.0));

    let last_event = app
        .logs
        .entries()
        .filter(|entry| entry.kind == LogKind::Event)
        .last()
        .map(|entry| entry.message.clone());
    assert_eq!(last_event.as_deref(), Some("Click: Unknown"));
}

#[test]
fn terminal_goto_navigates_on_next_frame() {
    let mut app = SpecsApp::default();
    let ctx = egui::Context::default();
    app.run_command("goto about");
    frame(&mut app, &ctx, 0.0, vec![]);

    assert_eq!(*app.router.current(), Route::About);
    let echoed = app.logs.entries().find(|entry| entry.kind == LogKind::Cmd);
    assert_eq!(echoed.map(|entry| entry.message.as_str()), Some("goto about"));
}

#[test]
fn terminal_errors_are_logged_not_fatal() {
    let mut app = SpecsApp::default();
    app.run_command("reboot now");
    app.run_command("goto nowhere");
    app.run_command("   ");

    let errors: Vec<_> = app
        .logs
        .entries()
        .filter(|entry| entry.kind == LogKind::Error)
        .map(|entry| entry.message.clone())
        .collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "Command not found: reboot. Type 'help'.");
    assert_eq!(*app.router.current(), Route::Dashboard);
}

#[test]
fn terminal_theme_and_dev_commands_update_settings() {
    let mut app = SpecsApp::default();
    app.run_command("theme cyber");
    app.run_command("dev on");

    assert_eq!(app.settings().theme_mode, ThemeMode::CyberGold);
    assert!(app.settings().dev_mode);
    assert_eq!(app.style.primary, crate::constants::CYBER_GOLD);
    assert_eq!(app.persist_request, Some(PersistRequest::Save));
}

#[test]
fn terminal_clear_and_source_commands() {
    let mut app = SpecsApp::default();
    app.run_command("help");
    assert!(app.logs.len() > 2);

    app.run_command("clear");
    assert!(app.logs.is_empty());

    app.run_command("source");
    assert!(app.overlays.source_viewer_open);
}

#[test]
fn terminal_overlay_draws_only_in_developer_mode() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.show_system_terminal = true);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    assert!(!has_widget(&ctx, "terminal-input"));

    app.update_settings(|s| s.dev_mode = true);
    frame(&mut app, &ctx, 0.1, vec![]);
    assert!(has_widget(&ctx, "terminal-input"));
}

#[test]
fn third_comparison_pick_raises_notice() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::ComponentDetail("cpu".into()));
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    app.toggle_compare(101);
    app.toggle_compare(102);
    assert!(app.notice.is_none());
    app.toggle_compare(103);

    let notice = app.notice.clone().expect("limit notice");
    assert_eq!(
        notice.message,
        "Comparison Limit Reached (Max 2). Please unselect one first."
    );
    assert_eq!(app.detail.compare.ids(), &[101, 102]);
}

#[test]
fn comparison_window_shows_with_two_models_and_closes() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::ComponentDetail("gpu".into()));
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    assert!(!has_widget(&ctx, "close-comparison"));

    app.toggle_compare(201);
    app.toggle_compare(202);
    frame(&mut app, &ctx, 0.1, vec![]);
    frame(&mut app, &ctx, 0.2, vec![]);
    assert!(has_widget(&ctx, "close-comparison"));

    let target = widget_center(&ctx, "close-comparison");
    click(&mut app, &ctx, 0.3, target);
    assert!(app.detail.compare.is_empty());
}

#[test]
fn leaving_detail_route_clears_comparison() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::ComponentDetail("ram".into()));
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    app.toggle_compare(401);

    app.navigate(&Route::ComponentDetail("cpu".into()));
    frame(&mut app, &ctx, 0.1, vec![]);

    assert!(app.detail.compare.is_empty());
}

#[test]
fn unknown_component_renders_placeholder() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::ComponentDetail("quantum".into()));
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    assert_eq!(*app.router.current(), Route::ComponentDetail("quantum".into()));
    assert!(has_widget(&ctx, "back-to-directory"));
    assert!(!has_widget(&ctx, "compare-101"));
}

#[test]
fn settings_change_is_persisted_on_flush() {
    let mut app = SpecsApp::default();
    let mut storage = MemoryStorage::default();

    app.update_settings(|s| s.border_radius = 12);
    app.flush_persistence(&mut storage);

    let reloaded = SettingsStore::load(Some(&storage));
    assert_eq!(reloaded.settings().border_radius, 12);
    assert_eq!(storage.flushes, 1);

    // Nothing pending, nothing written.
    app.flush_persistence(&mut storage);
    assert_eq!(storage.flushes, 1);
}

#[test]
fn noop_update_does_not_schedule_persistence() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.theme_mode = ThemeMode::Dark);
    assert!(app.persist_request.is_none());
}

#[test]
fn config_changes_are_logged_only_in_developer_mode() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.ui_density = crate::settings::UiDensity::Compact);
    assert!(app.logs.entries().all(|entry| entry.source != "CONFIG"));

    app.update_settings(|s| s.dev_mode = true);
    let config = app.logs.last().expect("config entry");
    assert_eq!(config.source, "CONFIG");
    assert!(config.message.contains("devMode"));
}

#[test]
fn confirmed_reset_restores_defaults() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.theme_mode = ThemeMode::Light;
        s.accent_color = "#ef4444".into();
    });
    app.request_confirm(PendingConfirmAction::ResetSettings);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    frame(&mut app, &ctx, 0.1, vec![]);

    let target = widget_center(&ctx, "confirm-action");
    click(&mut app, &ctx, 0.2, target);

    assert!(app.pending_confirm_action.is_none());
    assert_eq!(*app.settings(), AppSettings::default());
}

#[test]
fn cancelled_reset_keeps_settings() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.theme_mode = ThemeMode::Light);
    app.request_confirm(PendingConfirmAction::ResetSettings);
    app.cancel_confirm();
    app.confirm_pending();

    assert_eq!(app.settings().theme_mode, ThemeMode::Light);
}

#[test]
fn clear_storage_wipes_record_and_restarts_session() {
    let mut app = SpecsApp::default();
    let mut storage = MemoryStorage::default();
    app.update_settings(|s| s.dev_mode = true);
    app.flush_persistence(&mut storage);
    app.navigate(&Route::About);
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    app.request_confirm(PendingConfirmAction::ClearStorage);
    app.confirm_pending();
    app.flush_persistence(&mut storage);
    frame(&mut app, &ctx, 0.1, vec![]);

    assert_eq!(*app.settings(), AppSettings::default());
    assert_eq!(*app.router.current(), Route::Dashboard);
    assert_eq!(app.logs.len(), 1);
    assert_eq!(app.logs.last().map(|entry| entry.kind), Some(LogKind::Warn));
    assert_eq!(*SettingsStore::load(Some(&storage)).settings(), AppSettings::default());
}

#[test]
fn invalid_import_leaves_record_untouched() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.border_radius = 9);
    app.persist_request = None;

    assert!(!app.import_settings("{ not json"));
    assert_eq!(app.settings().border_radius, 9);
    assert!(app.persist_request.is_none());
    assert_eq!(app.notice.as_ref().map(|n| n.title.as_str()), Some("Import Failed"));
}

#[test]
fn out_of_range_import_is_clamped_and_still_renders() {
    let ctx = egui::Context::default();
    for (i, raw) in ["0", "-3", "1e30"].into_iter().enumerate() {
        let mut app = SpecsApp::default();
        assert!(app.import_settings(&format!(r#"{{"fontSizeScale":{raw},"borderRadius":200}}"#)));
        let scale = app.settings().font_size_scale;
        assert!((0.8..=1.5).contains(&scale), "scale {raw} kept as {scale}");
        assert_eq!(app.settings().border_radius, 20);

        frame(&mut app, &ctx, i as f64, vec![]);
        assert!(has_widget(&ctx, "nav-settings"));
    }
}

#[test]
fn out_of_range_persisted_blob_still_renders() {
    let mut storage = MemoryStorage::default();
    storage.values.insert(
        crate::constants::SETTINGS_STORAGE_KEY.to_string(),
        r#"{"fontSizeScale":1e30,"borderRadius":200}"#.to_string(),
    );
    let mut app = SpecsApp::with_parts(
        SettingsStore::load(Some(&storage)),
        Box::new(crate::router::MemoryLocation::default()),
    );
    assert_eq!(app.settings().font_size_scale, 1.5);

    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    frame(&mut app, &ctx, 0.1, vec![]);
    assert!(has_widget(&ctx, "nav-settings"));
}

#[test]
fn partial_import_changes_listed_fields_only() {
    let mut app = SpecsApp::default();
    assert!(app.import_settings(r#"{"themeMode":"light","fpsLimit":144}"#));

    let mut expected = AppSettings::default();
    expected.theme_mode = ThemeMode::Light;
    expected.fps_limit = 144;
    assert_eq!(*app.settings(), expected);
    assert_eq!(app.persist_request, Some(PersistRequest::Save));
}

#[test]
fn imported_file_is_applied_at_frame_start() {
    let mut app = SpecsApp::default();
    app.file
        .sender
        .send(state::FileOperationResult::ImportLoaded(
            "settings.json".into(),
            r#"{"gridStyle":"compact"}"#.into(),
        ))
        .expect("channel open");
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    assert_eq!(app.settings().grid_style, GridStyle::Compact);
}

#[test]
fn failed_file_operation_becomes_notice() {
    let mut app = SpecsApp::default();
    app.file
        .sender
        .send(state::FileOperationResult::OperationFailed("disk full".into()))
        .expect("channel open");
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    assert_eq!(app.notice.as_ref().map(|n| n.message.as_str()), Some("disk full"));
    assert_eq!(app.logs.last().map(|entry| entry.kind), Some(LogKind::Error));
}

#[test]
fn samplers_follow_their_flags() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.show_fps = true;
        s.show_dom_inspector = true;
    });
    assert!(app.overlays.fps.is_none());
    assert!(app.overlays.inspector.is_none());

    app.update_settings(|s| s.dev_mode = true);
    assert!(app.overlays.fps.is_some());
    assert!(app.overlays.inspector.is_some());

    app.update_settings(|s| s.show_fps = false);
    assert!(app.overlays.fps.is_none());
    assert!(app.overlays.inspector.is_some());

    app.update_settings(|s| s.dev_mode = false);
    assert!(app.overlays.inspector.is_none());
}

#[test]
fn fps_meter_counts_frames_per_second() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.dev_mode = true;
        s.show_fps = true;
    });
    let ctx = egui::Context::default();
    for i in 0..=20 {
        frame(&mut app, &ctx, f64::from(i) * 0.1, vec![]);
    }

    let fps = app.overlays.fps.as_ref().map(|c| c.fps()).unwrap_or_default();
    assert!((10..=11).contains(&fps), "unexpected fps {fps}");
}

#[test]
fn inspector_counts_registered_widgets() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.dev_mode = true;
        s.show_dom_inspector = true;
    });
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    frame(&mut app, &ctx, 1.5, vec![]);

    let stats = app.overlays.inspector.as_ref().map(|p| p.stats()).unwrap_or_default();
    assert!(stats.widgets > 0);
    assert_eq!(stats.width, 1200.0);
    assert_eq!(stats.breakpoint(), crate::diagnostics::Breakpoint::Large);
}

#[test]
fn side_navigation_moves_nav_out_of_header() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| {
        s.navigation_style = crate::settings::NavigationStyle::Side;
        s.sidebar_position = crate::settings::SidebarPosition::Left;
    });
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);

    let nav = widget_center(&ctx, "nav-dashboard");
    let brand = widget_center(&ctx, "brand");
    assert!(nav.y > brand.y, "side nav sits below the header");
}

#[test]
fn settings_tab_edit_goes_through_update() {
    let mut app = SpecsApp::default();
    app.navigate(&Route::Settings);
    app.panel.tab = SettingsTab::Layout;
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    frame(&mut app, &ctx, 0.05, vec![]);

    let list = capture::current(&ctx)
        .rects()
        .find(|(_, target)| target.text.as_deref() == Some("List"))
        .map(|(rect, _)| rect.center())
        .expect("list card drawn");
    click(&mut app, &ctx, 0.1, list);

    assert_eq!(app.settings().grid_style, GridStyle::List);
    assert_eq!(app.persist_request, Some(PersistRequest::Save));
}

#[test]
fn theme_tab_keeps_radius_at_its_largest_accepted_value() {
    let mut app = SpecsApp::default();
    app.update_settings(|s| s.border_radius = 24);
    assert_eq!(app.settings().border_radius, 20);
    app.persist_request = None;

    app.navigate(&Route::Settings);
    app.panel.tab = SettingsTab::Theme;
    let ctx = egui::Context::default();
    frame(&mut app, &ctx, 0.0, vec![]);
    frame(&mut app, &ctx, 0.05, vec![]);

    assert_eq!(app.settings().border_radius, 20);
    assert!(app.persist_request.is_none());
}
