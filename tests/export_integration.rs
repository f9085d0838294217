//! Integration tests for SVG and PNG export

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;

use xr_persona::export::{RasterSurface, Rasterizer, ResvgRasterizer};
use xr_persona::{
    ExportConfig, ExportError, ExportState, Exporter, FormUpdate, RenderConfig, Session,
};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Decodes successfully but only after a delay
struct SlowRasterizer {
    delay: Duration,
}

impl Rasterizer for SlowRasterizer {
    type Decoded = ();

    fn decode(&self, _svg: &str) -> Result<(), ExportError> {
        thread::sleep(self.delay);
        Ok(())
    }

    fn draw(&self, _decoded: &(), _scale: u32) -> Result<RasterSurface, ExportError> {
        Ok(RasterSurface {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        })
    }
}

/// Rejects every document
struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    type Decoded = ();

    fn decode(&self, _svg: &str) -> Result<(), ExportError> {
        Err(ExportError::Decode("unsupported document".to_string()))
    }

    fn draw(&self, _decoded: &(), _scale: u32) -> Result<RasterSurface, ExportError> {
        unreachable!("draw after failed decode")
    }
}

fn rendered_session(name: &str) -> Session {
    let mut session = Session::new(RenderConfig::default());
    session.update(FormUpdate::Name(name.to_string()));
    session.render();
    session
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_svg_export_writes_markup() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Themba Nkosi");
    let mut exporter = Exporter::new(ExportConfig::new().with_out_dir(dir.path()));

    let path = session.export_svg(&mut exporter).unwrap().unwrap();

    assert_eq!(path, dir.path().join("themba-nkosi-persona.svg"));
    assert_eq!(exporter.state(), ExportState::Downloaded);
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, session.image().unwrap().svg());
    assert_eq!(dir_entries(dir.path()), vec!["themba-nkosi-persona.svg"]);
}

#[test]
fn test_svg_export_creates_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cards").join("xr");
    let session = rendered_session("");
    let mut exporter = Exporter::new(ExportConfig::new().with_out_dir(&out));

    let path = session.export_svg(&mut exporter).unwrap().unwrap();
    assert_eq!(path, out.join("persona-persona.svg"));
    assert!(path.is_file());
}

#[test]
fn test_png_export_scales_surface() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Lerato");
    let config = ExportConfig::new().with_out_dir(dir.path()).with_scale(2);
    let mut exporter = Exporter::with_rasterizer(config, ResvgRasterizer::without_system_fonts());

    let path = session.export_png(&mut exporter).unwrap().unwrap();

    assert_eq!(path, dir.path().join("lerato-persona.png"));
    assert_eq!(exporter.state(), ExportState::Downloaded);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], PNG_SIGNATURE);

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (600, 1690));
    // Corners sit outside the rounded card, so only the white backdrop shows
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(dir_entries(dir.path()), vec!["lerato-persona.png"]);
}

#[test]
fn test_export_before_render_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::default();
    let mut exporter = Exporter::new(ExportConfig::new().with_out_dir(dir.path()));

    assert_eq!(session.export_svg(&mut exporter).unwrap(), None);
    assert_eq!(session.export_png(&mut exporter).unwrap(), None);
    assert_eq!(exporter.state(), ExportState::Idle);
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_png_export_times_out_on_stalled_decode() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Ana");
    let timeout = Duration::from_millis(50);
    let config = ExportConfig::new()
        .with_out_dir(dir.path())
        .with_decode_timeout(timeout);
    let mut exporter = Exporter::with_rasterizer(
        config,
        SlowRasterizer {
            delay: Duration::from_secs(2),
        },
    );

    let err = session.export_png(&mut exporter).unwrap_err();

    assert!(matches!(err, ExportError::DecodeTimeout(t) if t == timeout));
    assert_eq!(exporter.state(), ExportState::Failed);
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_png_export_reports_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Ana");
    let mut exporter = Exporter::with_rasterizer(
        ExportConfig::new().with_out_dir(dir.path()),
        BrokenRasterizer,
    );

    let err = session.export_png(&mut exporter).unwrap_err();

    assert!(matches!(err, ExportError::Decode(ref msg) if msg == "unsupported document"));
    assert_eq!(exporter.state(), ExportState::Failed);
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_png_export_rejects_bad_scale() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Ana");
    let config = ExportConfig::new().with_out_dir(dir.path()).with_scale(0);
    let mut exporter = Exporter::with_rasterizer(config, BrokenRasterizer);

    let err = session.export_png(&mut exporter).unwrap_err();
    assert!(matches!(err, ExportError::InvalidScale { scale: 0, max: 8 }));
    assert_eq!(exporter.state(), ExportState::Failed);
}

#[test]
fn test_png_then_svg_with_one_exporter() {
    let dir = tempfile::tempdir().unwrap();
    let session = rendered_session("Ana");
    let mut exporter = Exporter::with_rasterizer(
        ExportConfig::new().with_out_dir(dir.path()),
        SlowRasterizer {
            delay: Duration::ZERO,
        },
    );

    let path = session.export_png(&mut exporter).unwrap().unwrap();
    assert_eq!(exporter.state(), ExportState::Downloaded);
    assert_eq!(&fs::read(path).unwrap()[..8], PNG_SIGNATURE);

    let path = session.export_svg(&mut exporter).unwrap().unwrap();
    assert_eq!(exporter.state(), ExportState::Downloaded);
    assert!(path.ends_with("ana-persona.svg"));
}
