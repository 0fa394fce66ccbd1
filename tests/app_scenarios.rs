use glam::DVec2;

use vecplane::{App, DrawCommand, InputEvent, Key, Layer, PlaneConfig, PointerButton};

fn press(app: &mut App, x: f64, y: f64, button: PointerButton) -> bool {
    app.handle(InputEvent::PointerDown { position: DVec2::new(x, y), button })
}

fn release(app: &mut App, x: f64, y: f64, button: PointerButton) -> bool {
    app.handle(InputEvent::PointerUp { position: DVec2::new(x, y), button })
}

fn key(app: &mut App, c: char) -> bool {
    app.handle(InputEvent::KeyUp(Key::Character(c)))
}

fn close(a: DVec2, b: DVec2) -> bool {
    (a - b).abs().max_element() < 1e-9
}

#[test]
fn click_from_center_to_lower_right() {
    let mut app = App::new(&PlaneConfig::default()).unwrap();
    press(&mut app, 360.0, 360.0, PointerButton::Primary);
    assert!(release(&mut app, 600.0, 600.0, PointerButton::Primary));

    let v = &app.plane().vectors()[0];
    assert!(close(v.origin(), DVec2::ZERO));
    assert!(close(v.endpoint(), DVec2::new(2.0 / 3.0, 2.0 / 3.0)));

    let scene = app.scene();
    let label = scene.labels().next().unwrap();
    assert_eq!(label.text, "0.667, 0.667");
    assert!(close(label.position, DVec2::new(610.0, 610.0)));
}

#[test]
fn build_combine_and_undo() {
    let mut app = App::new(&PlaneConfig {
        gridlines: 8,
        ..PlaneConfig::default()
    })
    .unwrap();

    // (0.5, 0.5) and (-0.5, 0.25)
    press(&mut app, 0.0, 0.0, PointerButton::Primary);
    release(&mut app, 540.0, 540.0, PointerButton::Primary);
    press(&mut app, 0.0, 0.0, PointerButton::Primary);
    release(&mut app, 180.0, 450.0, PointerButton::Primary);

    assert!(key(&mut app, 's'));
    let diff = app.plane().vectors()[2].endpoint();
    assert!(close(diff, DVec2::new(1.0, 0.25)));

    // secondary click drops the difference, multiply uses the originals again
    assert!(press(&mut app, 10.0, 10.0, PointerButton::Secondary));
    assert!(key(&mut app, 'M'));
    let product = app.plane().vectors()[2].endpoint();
    assert!(close(product, DVec2::new(-0.25, 0.125)));

    for _ in 0..3 {
        press(&mut app, 0.0, 0.0, PointerButton::Secondary);
    }
    assert!(app.plane().is_empty());
    assert!(!press(&mut app, 0.0, 0.0, PointerButton::Secondary));
    assert!(!key(&mut app, 'a'));
    assert!(app.plane().is_empty());
}

#[test]
fn scrolling_reshapes_the_grid() {
    let mut app = App::new(&PlaneConfig {
        gridlines: 8,
        hide_basis_vectors: true,
        ..PlaneConfig::default()
    })
    .unwrap();

    let grid_lines = |app: &App| app.scene().lines().filter(|l| l.layer == Layer::Grid).count();
    assert_eq!(grid_lines(&app), 16);

    app.handle(InputEvent::Scroll { delta_y: 1.0 });
    assert_eq!(grid_lines(&app), 32);

    let mut counts = vec![];
    for _ in 0..6 {
        app.handle(InputEvent::Scroll { delta_y: -1.0 });
        counts.push(app.plane().gridlines());
    }
    assert_eq!(counts, vec![8, 4, 2, 1, 1, 1]);
    assert_eq!(grid_lines(&app), 0);
}

#[test]
fn foreground_is_drawn_last() {
    let mut app = App::new(&PlaneConfig::default()).unwrap();
    press(&mut app, 0.0, 0.0, PointerButton::Primary);
    release(&mut app, 100.0, 700.0, PointerButton::Primary);

    let scene = app.scene();
    let mut last = Layer::Grid;
    for command in &scene {
        if let DrawCommand::Line(line) = command {
            assert!(line.layer >= last);
            last = line.layer;
        }
    }
    assert_eq!(last, Layer::Vector);
    assert!(matches!(scene.commands().last(), Some(DrawCommand::Label(_))));
}
