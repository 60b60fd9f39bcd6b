use chart_axis::core::primitives::calendar_to_serial;
use chart_axis::core::tics::{major_tics, minor_tics};
use chart_axis::core::{DateUnit, ScaleDefaults};
use chart_axis::{AxisOrientation, Scale, ScaleType};

fn manual(scale_type: ScaleType, orientation: AxisOrientation, min: f64, max: f64) -> Scale {
    let mut scale = Scale::new(scale_type, orientation, &ScaleDefaults::default());
    scale.set_min(min).expect("valid min");
    scale.set_max(max).expect("valid max");
    scale
}

#[test]
fn linear_scale_maps_midpoint_and_back() {
    let scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 100.0);
    let space = scale.coordinate_space(0.0, 200.0);

    assert!((space.transform(50.0) - 100.0).abs() <= 1e-9);
    assert!((space.reverse_transform(100.0) - 50.0).abs() <= 1e-9);
}

#[test]
fn log_scale_spaces_decades_evenly() {
    let scale = manual(ScaleType::Log, AxisOrientation::Horizontal, 1.0, 1000.0);
    let space = scale.coordinate_space(0.0, 300.0);

    assert!((space.transform(10.0) - 100.0).abs() <= 1e-9);
    assert!((space.transform(100.0) - 200.0).abs() <= 1e-9);
    assert!((space.reverse_transform(150.0) - 10_f64.powf(1.5)).abs() <= 1e-9);
}

#[test]
fn exponent_scale_squares_before_mapping() {
    let mut scale = manual(ScaleType::Exponent, AxisOrientation::Horizontal, 0.0, 10.0);
    scale.set_exponent(2.0).expect("valid exponent");
    let space = scale.coordinate_space(0.0, 100.0);

    assert!((space.transform(5.0) - 25.0).abs() <= 1e-9);
    assert!((space.reverse_transform(25.0) - 5.0).abs() <= 1e-9);
}

#[test]
fn ordinal_scale_places_points_by_position() {
    let scale = manual(ScaleType::Ordinal, AxisOrientation::Horizontal, 1.0, 5.0);
    let space = scale.coordinate_space(0.0, 400.0);

    // Third point sits on ordinal 3 whatever its raw x value.
    assert!((space.transform_ordinal(false, 2, 1_234.0) - 200.0).abs() <= 1e-9);
    assert!((space.transform_ordinal(true, 2, 2.0) - 100.0).abs() <= 1e-9);
}

#[test]
fn reversed_horizontal_scale_starts_at_right_edge() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 10.0);
    scale.is_reverse = true;
    let space = scale.coordinate_space(50.0, 150.0);

    assert!(space.is_descending());
    assert!((space.transform(0.0) - 150.0).abs() <= 1e-9);
    assert!((space.transform(10.0) - 50.0).abs() <= 1e-9);
}

#[test]
fn vertical_scale_grows_upwards() {
    let scale = manual(ScaleType::Linear, AxisOrientation::Vertical, -10.0, 10.0);
    let space = scale.coordinate_space(0.0, 400.0);

    assert!((space.transform(-10.0) - 400.0).abs() <= 1e-9);
    assert!((space.transform(0.0) - 200.0).abs() <= 1e-9);
    assert!((space.transform(10.0) - 0.0).abs() <= 1e-9);
}

#[test]
fn inverted_manual_bounds_flip_the_axis() {
    let scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 10.0, 0.0);
    let space = scale.coordinate_space(0.0, 200.0);

    assert!((space.transform(10.0) - 0.0).abs() <= 1e-9);
    assert!((space.transform(5.0) - 100.0).abs() <= 1e-9);
    assert!((space.transform(0.0) - 200.0).abs() <= 1e-9);
    assert!((space.reverse_transform(50.0) - 7.5).abs() <= 1e-9);
    assert!((space.transform(space.reverse_transform(50.0)) - 50.0).abs() <= 1e-9);
}

#[test]
fn equal_bounds_do_not_produce_nan_pixels() {
    let scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 5.0, 5.0);
    let space = scale.coordinate_space(0.0, 100.0);

    let px = space.transform(5.0);
    assert!(px.is_finite());
    assert!(space.reverse_transform(px).is_finite());
}

#[test]
fn manual_steps_drive_major_and_minor_tics() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, -1.0, 1.0);
    scale.set_major_step(0.5).expect("major step");
    scale.set_minor_step(0.25).expect("minor step");

    let majors = major_tics(&scale, 1000);
    assert_eq!(majors, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

    let minors = minor_tics(&scale, 1000, 5000);
    assert_eq!(minors, vec![-0.75, -0.25, 0.25, 0.75]);
}

#[test]
fn major_tics_honour_the_cap() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 1000.0);
    scale.set_major_step(1.0).expect("major step");

    assert_eq!(major_tics(&scale, 10).len(), 10);
}

#[test]
fn labels_follow_scale_type() {
    let mut linear = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 1.0);
    linear.set_decimals(2);
    assert_eq!(linear.make_label(0.5, None), "0.50");
    assert_eq!(linear.make_label(-0.0, None), "0.00");

    let log = manual(ScaleType::Log, AxisOrientation::Horizontal, 1.0, 1000.0);
    assert_eq!(log.make_label(100.0, None), "10^2");
    assert_eq!(log.make_label(20.0, None), "20");

    let mut text = manual(ScaleType::Text, AxisOrientation::Horizontal, 1.0, 3.0);
    text.set_text_labels(vec!["north".to_owned(), "south".to_owned()])
        .expect("text labels");
    assert_eq!(text.make_label(2.0, None), "south");
    assert_eq!(text.make_label(3.0, None), "");
}

#[test]
fn scale_type_swap_keeps_bounds_and_resets_format() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 2.0, 40.0);
    scale.set_decimals(4);

    let log = scale.with_type(ScaleType::Log);
    assert_eq!(log.scale_type(), ScaleType::Log);
    assert_eq!(log.min(), 2.0);
    assert_eq!(log.max(), 40.0);
    assert!(!log.is_min_auto());
    assert!(log.is_format_auto());
}

#[test]
fn base_tic_shifts_the_major_grid() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 10.0);
    scale.set_major_step(4.0).expect("major step");
    scale.set_base_tic(Some(1.0)).expect("finite base tic");
    assert_eq!(major_tics(&scale, 1000), vec![1.0, 5.0, 9.0]);

    assert!(scale.set_base_tic(Some(f64::NAN)).is_err());
    assert_eq!(scale.base_tic(), Some(1.0));
}

#[test]
fn manual_date_units_and_format_drive_labels() {
    let start = calendar_to_serial(2024, 1, 1, 0, 0, 0).expect("valid date");
    let end = calendar_to_serial(2024, 7, 1, 0, 0, 0).expect("valid date");
    let mut scale = manual(ScaleType::Date, AxisOrientation::Horizontal, start, end);
    scale.set_date_units(DateUnit::Month, DateUnit::Day).expect("date scale");
    scale.set_major_step(1.0).expect("major step");
    scale.set_minor_step(7.0).expect("minor step");
    scale.set_date_format("%Y-%m");
    assert!(!scale.is_format_auto());

    let majors = major_tics(&scale, 1000);
    assert_eq!(majors.len(), 7);
    assert_eq!(scale.make_label(majors[2], None), "2024-03");

    let mut linear = manual(ScaleType::Linear, AxisOrientation::Horizontal, 0.0, 1.0);
    assert!(linear.set_date_units(DateUnit::Year, DateUnit::Month).is_err());
    assert!(linear.text_labels().is_none());
}

#[test]
fn auto_flags_toggle_independently() {
    let mut scale = manual(ScaleType::Linear, AxisOrientation::Vertical, 0.0, 1.0);
    scale.set_min_auto(true);
    assert!(scale.is_min_auto());
    assert!(!scale.is_max_auto());
    scale.set_max_auto(true);
    scale.set_major_step_auto(false);
    scale.set_minor_step_auto(false);
    scale.set_mag_auto(false);
    scale.set_format_auto(false);

    assert!(scale.is_max_auto());
    assert!(!scale.is_major_step_auto());
    assert!(!scale.is_minor_step_auto());
    assert!(!scale.is_mag_auto());
    assert!(!scale.is_format_auto());
    assert!(!ScaleType::Linear.is_date());
    assert!(ScaleType::DateAsOrdinal.is_date());
}
