use lenslet::{
    Degrees, LatticeConfig, LensletArray, LensletConfig, LensletRenderer,
    Millimeter, RenderConfig,
};
use validator::ValidationErrors;

#[test]
fn test_lenslet_config_validation() {
    let config = LensletConfig {
        eyebox_z: Millimeter(-3.0),       // valid
        eye_relief: Millimeter(-1.0),     // invalid
        sphere_radius: Millimeter(0.0),   // invalid
        focal_length: Millimeter(10.0),   // valid
        fov_theta: Degrees(0.0),          // invalid
        fov_phi: Degrees(179.0),          // valid (but weird)
        direction: [1.0, 1.0, 0.0],       // invalid (parallel to eyebox)
        lattice: LatticeConfig {
            tile_size: Millimeter(-0.5), // invalid
        },
        ..Default::default()
    };

    // This is a bit of a lazy check but it works well enough
    let err = LensletArray::generate(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        vec![
            "direction",
            "eye_relief",
            "fov_theta",
            "lattice",
            "sphere_radius"
        ],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_render_config_validation() {
    let render_config = RenderConfig {
        stroke_width: -0.1, // invalid
        ..Default::default()
    };
    let err = LensletRenderer::new(render_config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    assert!(validation_errors.errors().contains_key("stroke_width"));
}
