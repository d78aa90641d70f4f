use surface_automata::geometry::Welding;
use surface_automata::io::{MeshReader, MeshWriter, ObjReader, ObjWriter, load_obj, save_obj};
use surface_automata::mesh_error::MeshError;
use surface_automata::mesh_generation::{TorusOptions, icosphere, torus};
use surface_automata::topology::{CellMesh, ValidationOptions, validate_mesh};

fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("surface_automata_{}_{name}", std::process::id()))
}

#[test]
fn icosphere_survives_a_file_round_trip() {
    let soup = icosphere(2);
    let path = scratch("icosphere.obj");
    save_obj(&path, &soup).unwrap();
    let cells = load_obj(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cells.mesh().to_triangles(), soup);
    assert_eq!(cells.mesh().num_vertices(), 162);
    assert!(validate_mesh(&cells, &ValidationOptions::default()).is_ok());
}

#[test]
fn torus_adjacency_is_unchanged_by_export() {
    let soup = torus(&TorusOptions::default()).unwrap();
    let mut buf = Vec::new();
    ObjWriter.write(&mut buf, &soup).unwrap();
    let mesh = ObjReader
        .read(buf.as_slice())
        .unwrap()
        .into_mesh(Welding::Exact)
        .unwrap();
    let reread = CellMesh::new(mesh).unwrap();
    let direct = CellMesh::from_triangles(&soup, Welding::Exact).unwrap();
    assert_eq!(reread.adjacency(), direct.adjacency());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_obj(scratch("does_not_exist.obj")).unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
}

#[test]
fn quads_are_rejected_on_load() {
    let path = scratch("quad.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
    let err = load_obj(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert_eq!(
        err,
        MeshError::NotTriangular {
            face: 0,
            vertices: 4
        }
    );
}
