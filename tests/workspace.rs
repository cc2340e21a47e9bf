//! Integration tests for workspace bootstrap and logging.

use plotter::{Draw, Plot, Style, Workspace};

#[test]
fn init_creates_layout_and_logging_writes_to_log_dir() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::init(dir.path()).unwrap();

    for sub in Workspace::DIRS {
        assert!(dir.path().join(sub).is_dir(), "missing {}", sub);
    }
    let colors = std::fs::read_to_string(dir.path().join("utils/info/colors.txt")).unwrap();
    assert!(colors.lines().any(|line| line == "firebrick"));
    assert!(dir.path().join("text/text_example.json").is_file());

    let style = Style::from_file(dir.path().join("utils/style.json")).unwrap();
    assert_eq!(&style, ws.style());

    // The only test in this binary that installs a logger.
    ws.setup_logging().unwrap();
    assert!(ws.log_file().is_file());
    log::info!("workspace test");
}

#[test]
fn workspace_canvas_reads_text_and_writes_images() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::init(dir.path()).unwrap();

    let mut canvas = ws.canvas("text_example.json", (1, 1), "line.png").unwrap();
    canvas.setup(0).unwrap();
    assert_eq!(canvas.subplot(0).unwrap().labels().title, "Example");

    Plot::new(&[0.0, 1.0], |x| 2.0 * x, (0.0, 0.0))
        .unwrap()
        .draw(&mut canvas, 0)
        .unwrap();
    assert_eq!(
        canvas.subplot(0).unwrap().layers()[0].label(),
        Some("fit")
    );
    canvas.end(false).unwrap();
    assert!(ws.img_dir().join("line.png").is_file());
}

#[test]
fn init_keeps_an_edited_style_sheet() {
    let dir = tempfile::tempdir().unwrap();
    Workspace::init(dir.path()).unwrap();
    std::fs::write(dir.path().join("utils/style.json"), r#"{"grid": false}"#).unwrap();

    let ws = Workspace::init(dir.path()).unwrap();
    assert!(!ws.style().grid);
    assert_eq!(ws.style().subplot_size, Style::default().subplot_size);
}
