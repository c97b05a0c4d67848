use csg_kernel::{check_closed, Kernel, MockKernel};
use export_sink::{encode_stl, ExportSink, MemorySink, StlFileSink, StlFormat};

fn closed_box() -> csg_kernel::RenderMesh {
    let mut kernel = MockKernel::new();
    let b = kernel.make_box([10.0, 20.0, 5.0]).unwrap();
    let mesh = kernel.tessellate(&b, 0.1).unwrap();
    check_closed(&mesh).unwrap();
    mesh
}

#[test]
fn binary_size_matches_triangle_count() {
    let mesh = closed_box();
    let bytes = encode_stl(&mesh, "box", StlFormat::Binary).unwrap();
    assert_eq!(bytes.len(), 84 + 12 * 50);
}

#[test]
fn encoding_is_deterministic() {
    let mesh = closed_box();
    let a = encode_stl(&mesh, "box", StlFormat::Binary).unwrap();
    let b = encode_stl(&mesh, "box", StlFormat::Binary).unwrap();
    assert_eq!(a, b);
}

#[test]
fn ascii_has_one_facet_per_triangle() {
    let mesh = closed_box();
    let text = String::from_utf8(encode_stl(&mesh, "box", StlFormat::Ascii).unwrap()).unwrap();
    assert_eq!(text.matches("facet normal").count(), 12);
}

#[test]
fn file_and_memory_sinks_agree() {
    let mesh = closed_box();
    let tmp = tempfile::tempdir().unwrap();
    let mut files = StlFileSink::new(tmp.path(), StlFormat::Binary);
    let mut memory = MemorySink::new(StlFormat::Binary);
    files.export_mesh(&mesh, "case_body").unwrap();
    memory.export_mesh(&mesh, "case_body").unwrap();
    let on_disk = std::fs::read(tmp.path().join("case_body.stl")).unwrap();
    assert_eq!(Some(on_disk.as_slice()), memory.get("case_body"));
}

#[test]
fn unwritable_directory_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let mut sink = StlFileSink::new(blocker.join("out"), StlFormat::Binary);
    let err = sink.export_mesh(&closed_box(), "case_body").unwrap_err();
    assert!(matches!(err, export_sink::ExportError::Io { .. }));
}
