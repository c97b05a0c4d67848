//! STL output of the reference enclosure, through the in-memory sink.

use export_sink::StlFormat;
use test_harness::EnclosureRun;

fn triangle_count(stl: &[u8]) -> u32 {
    u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]])
}

#[test]
fn binary_stl_for_both_solids() {
    let generated = EnclosureRun::mock().generate().unwrap();
    let sink = generated.stl(StlFormat::Binary).unwrap();

    for name in ["case_body", "fascia_lid"] {
        let stl = sink.get(name).unwrap();
        let tris = triangle_count(stl);
        assert!(tris > 0);
        assert_eq!(stl.len(), 84 + tris as usize * 50, "{name}: size mismatch");
        assert!(stl.starts_with(format!("binary STL: {name}").as_bytes()));
    }
}

#[test]
fn ascii_stl_names_the_solid() {
    let generated = EnclosureRun::mock().generate().unwrap();
    let sink = generated.stl(StlFormat::Ascii).unwrap();
    let text = std::str::from_utf8(sink.get("fascia_lid").unwrap()).unwrap();
    assert!(text.starts_with("solid fascia_lid\n"));
    assert!(text.trim_end().ends_with("endsolid fascia_lid"));
}

#[test]
fn stl_bytes_are_idempotent() {
    let a = EnclosureRun::mock().generate().unwrap();
    let b = EnclosureRun::mock().generate().unwrap();
    let sa = a.stl(StlFormat::Binary).unwrap();
    let sb = b.stl(StlFormat::Binary).unwrap();
    assert_eq!(sa.get("case_body"), sb.get("case_body"));
    assert_eq!(sa.get("fascia_lid"), sb.get("fascia_lid"));
}
