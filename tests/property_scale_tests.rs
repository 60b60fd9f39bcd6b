use chart_axis::core::ScaleDefaults;
use chart_axis::core::tics::{major_tics, minor_tics};
use chart_axis::{
    AxisId, AxisOrientation, ChartConfig, EstimatedTextMeasurer, GraphPane, PointPair, RectF,
    Scale, ScaleType, Series,
};
use proptest::prelude::*;

fn manual(scale_type: ScaleType, min: f64, max: f64, is_reverse: bool) -> Scale {
    let mut scale = Scale::new(scale_type, AxisOrientation::Horizontal, &ScaleDefaults::default());
    scale.set_min(min).expect("valid min");
    scale.set_max(max).expect("valid max");
    scale.is_reverse = is_reverse;
    scale
}

proptest! {
    #[test]
    fn linear_round_trip_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        is_reverse in any::<bool>()
    ) {
        let value = min + value_factor * span;
        let scale = manual(ScaleType::Linear, min, min + span, is_reverse);
        let space = scale.coordinate_space(0.0, 2048.0);

        let recovered = space.reverse_transform(space.transform(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * value.abs().max(span));
    }

    #[test]
    fn log_round_trip_property(
        min_decade in -6.0f64..6.0,
        decades in 0.1f64..8.0,
        value_factor in 0.0f64..1.0,
        is_reverse in any::<bool>()
    ) {
        let min = 10_f64.powf(min_decade);
        let max = 10_f64.powf(min_decade + decades);
        let value = 10_f64.powf(min_decade + value_factor * decades);
        let scale = manual(ScaleType::Log, min, max, is_reverse);
        let space = scale.coordinate_space(0.0, 2048.0);

        let recovered = space.reverse_transform(space.transform(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * value);
    }

    #[test]
    fn exponent_round_trip_property(
        min in -1_000.0f64..1_000.0,
        span in 1.0f64..1_000.0,
        value_factor in 0.0f64..1.0,
        exponent in 0.5f64..3.0
    ) {
        let value = min + value_factor * span;
        let mut scale = manual(ScaleType::Exponent, min, min + span, false);
        scale.set_exponent(exponent).expect("valid exponent");
        let space = scale.coordinate_space(0.0, 2048.0);

        let recovered = space.reverse_transform(space.transform(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * value.abs().max(1.0));
    }

    #[test]
    fn log_pixel_round_trip_property(
        min_decade in -6.0f64..6.0,
        decades in 0.1f64..8.0,
        pixel in 0.0f64..1024.0,
        is_reverse in any::<bool>()
    ) {
        let min = 10_f64.powf(min_decade);
        let max = 10_f64.powf(min_decade + decades);
        let scale = manual(ScaleType::Log, min, max, is_reverse);
        let space = scale.coordinate_space(0.0, 1024.0);

        prop_assert!((space.transform(space.reverse_transform(pixel)) - pixel).abs() <= 1e-6);
    }

    #[test]
    fn date_round_trip_property(
        start in 0.0f64..80_000.0,
        span in 0.001f64..20_000.0,
        value_factor in 0.0f64..1.0,
        is_reverse in any::<bool>()
    ) {
        let value = start + value_factor * span;
        let scale = manual(ScaleType::Date, start, start + span, is_reverse);
        let space = scale.coordinate_space(0.0, 2048.0);

        let recovered = space.reverse_transform(space.transform(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * value.abs().max(span));
    }

    #[test]
    fn ordinal_and_text_round_trip_property(
        scale_type in prop::sample::select(vec![
            ScaleType::Ordinal,
            ScaleType::LinearAsOrdinal,
            ScaleType::DateAsOrdinal,
            ScaleType::Text,
        ]),
        count in 1usize..500,
        pixel in 0.0f64..900.0,
        is_reverse in any::<bool>()
    ) {
        let scale = manual(scale_type, 0.5, count as f64 + 0.5, is_reverse);
        let space = scale.coordinate_space(0.0, 900.0);

        let position = space.reverse_transform(pixel);
        prop_assert!((space.transform(position) - pixel).abs() <= 1e-6);
        let slot = (position.round() as usize).clamp(1, count);
        let slot_pixel = space.transform_ordinal(false, slot - 1, 0.0);
        prop_assert!((space.reverse_transform(slot_pixel) - slot as f64).abs() <= 1e-6);
    }

    #[test]
    fn inverted_bounds_round_trip_property(
        max in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        pixel in 0.0f64..500.0
    ) {
        let scale = manual(ScaleType::Linear, max + span, max, false);
        let space = scale.coordinate_space(0.0, 500.0);

        prop_assert!((space.transform(space.reverse_transform(pixel)) - pixel).abs() <= 1e-6);
        prop_assert!((space.transform(max + span) - 0.0).abs() <= 1e-6);
        prop_assert!((space.transform(max) - 500.0).abs() <= 1e-6);
    }

    #[test]
    fn log_transform_is_monotonic_property(
        min_decade in -6.0f64..6.0,
        decades in 0.1f64..8.0,
        a_factor in 0.0f64..1.0,
        b_factor in 0.0f64..1.0,
        is_reverse in any::<bool>()
    ) {
        let (low, high) = if a_factor <= b_factor { (a_factor, b_factor) } else { (b_factor, a_factor) };
        let scale = manual(
            ScaleType::Log,
            10_f64.powf(min_decade),
            10_f64.powf(min_decade + decades),
            is_reverse,
        );
        let space = scale.coordinate_space(0.0, 800.0);

        let low_px = space.transform(10_f64.powf(min_decade + low * decades));
        let high_px = space.transform(10_f64.powf(min_decade + high * decades));
        if is_reverse {
            prop_assert!(low_px >= high_px - 1e-9);
        } else {
            prop_assert!(low_px <= high_px + 1e-9);
        }
    }

    #[test]
    fn transform_is_monotonic_property(
        min in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        a_factor in 0.0f64..1.0,
        b_factor in 0.0f64..1.0,
        is_reverse in any::<bool>()
    ) {
        let (low, high) = if a_factor <= b_factor { (a_factor, b_factor) } else { (b_factor, a_factor) };
        let scale = manual(ScaleType::Linear, min, min + span, is_reverse);
        let space = scale.coordinate_space(10.0, 810.0);

        let low_px = space.transform(min + low * span);
        let high_px = space.transform(min + high * span);
        if is_reverse {
            prop_assert!(low_px >= high_px);
        } else {
            prop_assert!(low_px <= high_px);
        }
    }

    #[test]
    fn pixel_round_trip_is_stable_property(
        min in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        pixel in 0.0f64..600.0
    ) {
        let scale = manual(ScaleType::Linear, min, min + span, false);
        let space = scale.coordinate_space(0.0, 600.0);

        let value = space.reverse_transform(pixel);
        prop_assert!((space.transform(value) - pixel).abs() <= 1e-6);
    }

    #[test]
    fn minor_tics_never_repeat_majors_property(
        start_index in -50i64..50,
        step_count in 1i64..20,
        major_step in prop::sample::select(vec![1.0f64, 2.0, 5.0, 10.0, 20.0, 50.0]),
        divisor in prop::sample::select(vec![2.0f64, 4.0, 8.0])
    ) {
        let min = start_index as f64 * major_step;
        let max = min + step_count as f64 * major_step;
        let mut scale = manual(ScaleType::Linear, min, max, false);
        scale.set_major_step(major_step).expect("major step");
        scale.set_minor_step(major_step / divisor).expect("minor step");

        let majors = major_tics(&scale, 1000);
        let minors = minor_tics(&scale, 1000, 5000);

        prop_assert_eq!(majors.len() as i64, step_count + 1);
        prop_assert_eq!(minors.len() as f64, step_count as f64 * (divisor - 1.0));
        for minor in &minors {
            prop_assert!(*minor >= min && *minor <= max);
            prop_assert!(majors.iter().all(|major| major != minor));
        }
        prop_assert!(minors.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn auto_range_covers_the_data_property(
        ys in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 1..40)
    ) {
        let mut pane = GraphPane::new(ChartConfig::new(RectF::new(0.0, 0.0, 800.0, 600.0)))
            .expect("valid pane");
        let points: Vec<PointPair> = ys
            .iter()
            .enumerate()
            .map(|(index, &y)| PointPair::new(index as f64, y))
            .collect();
        pane.add_series(Series::line("data", points));
        pane.axis_change(&EstimatedTextMeasurer);

        let y_scale = pane.axis(AxisId::Y(0)).expect("y axis").scale();
        let y_slack = 1e-9 * (y_scale.min().abs() + y_scale.max().abs() + 1.0);
        for y in &ys {
            prop_assert!(y_scale.min() <= *y + y_slack);
            prop_assert!(y_scale.max() >= *y - y_slack);
        }
        prop_assert!(y_scale.min() < y_scale.max());

        let x_scale = pane.x_axis().scale();
        prop_assert!(x_scale.min() <= 0.0);
        prop_assert!(x_scale.max() >= (ys.len() - 1) as f64);
    }
}
