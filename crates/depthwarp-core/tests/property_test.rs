use burn::tensor::{Tensor, TensorData};
use burn_ndarray::NdArray;
use depthwarp_core::camera::{scale_pyramid, Intrinsics};
use depthwarp_core::sample;
use nalgebra::Matrix3;
use proptest::prelude::*;

type Backend = NdArray<f32>;

#[test]
fn test_scale_pyramid_halves_previous_level() {
    let k = Matrix3::new(
        100.0, 0.0, 50.0,
        0.0, 100.0, 50.0,
        0.0, 0.0, 1.0,
    );
    let levels = scale_pyramid(&k, 3);

    assert_eq!(levels.len(), 3);
    assert_eq!(levels[0], k);

    let expected_fx = [100.0, 50.0, 25.0];
    let expected_cx = [50.0, 25.0, 12.5];
    for (s, level) in levels.iter().enumerate() {
        assert_eq!(level[(0, 0)], expected_fx[s]);
        assert_eq!(level[(1, 1)], expected_fx[s]);
        assert_eq!(level[(0, 2)], expected_cx[s]);
        assert_eq!(level[(1, 2)], expected_cx[s]);
        assert_eq!(level[(2, 2)], 1.0);
    }
}

proptest! {
    #[test]
    fn test_pyramid_levels_compound(
        fx in 1.0f64..2000.0, fy in 1.0f64..2000.0,
        cx in 0.0f64..1000.0, cy in 0.0f64..1000.0,
        n in 0usize..8
    ) {
        let k = Intrinsics::new(fx, fy, cx, cy);
        let levels = k.pyramid(n);
        prop_assert_eq!(levels.len(), n);

        for pair in levels.windows(2) {
            prop_assert_eq!(pair[1].fx, pair[0].fx / 2.0);
            prop_assert_eq!(pair[1].fy, pair[0].fy / 2.0);
            prop_assert_eq!(pair[1].cx, pair[0].cx / 2.0);
            prop_assert_eq!(pair[1].cy, pair[0].cy / 2.0);
        }
    }

    #[test]
    fn test_integer_coordinates_are_exact(
        u in 0usize..5, v in 0usize..4, batch in 0usize..2
    ) {
        let device = Default::default();
        let dims = [2, 3, 4, 5];
        let data: Vec<f32> = (0..120).map(|i| (i as f32) * 0.5 - 7.0).collect();
        let x = Tensor::<Backend, 4>::from_data(TensorData::new(data.clone(), dims), &device);

        let coords = [u as f32, v as f32];
        let grid = Tensor::<Backend, 4>::from_data(
            TensorData::new(vec![coords[0], coords[1], coords[0], coords[1]], [2, 2, 1, 1]),
            &device,
        );

        let out = sample(x, grid).unwrap().into_data().to_vec::<f32>().unwrap();
        for c in 0..3 {
            let expected = data[((batch * 3 + c) * 4 + v) * 5 + u];
            prop_assert_eq!(out[batch * 3 + c], expected);
        }
    }

    #[test]
    fn test_constant_image_is_preserved(
        u in -10.0f32..10.0, v in -10.0f32..10.0, value in -100.0f32..100.0
    ) {
        // Weights sum to one, so a constant image samples to its constant.
        let device = Default::default();
        let x = Tensor::<Backend, 4>::full([1, 2, 3, 3], value, &device);
        let grid = Tensor::<Backend, 4>::from_data(TensorData::new(vec![u, v], [1, 2, 1, 1]), &device);

        let out = sample(x, grid).unwrap().into_data().to_vec::<f32>().unwrap();
        for sampled in out {
            prop_assert!((sampled - value).abs() <= 1e-4 * value.abs().max(1.0));
        }
    }

    #[test]
    fn test_negative_coordinates_clamp_to_zero(v in 0.0f32..2.0, shift in 1.0f32..50.0) {
        let device = Default::default();
        let data: Vec<f32> = (0..9).map(|i| (i * i) as f32).collect();
        let x = Tensor::<Backend, 4>::from_data(TensorData::new(data, [1, 1, 3, 3]), &device);

        let outside = Tensor::<Backend, 4>::from_data(TensorData::new(vec![-shift, v], [1, 2, 1, 1]), &device);
        let border = Tensor::<Backend, 4>::from_data(TensorData::new(vec![0.0, v], [1, 2, 1, 1]), &device);

        let a = sample(x.clone(), outside).unwrap().into_scalar();
        let b = sample(x, border).unwrap().into_scalar();
        prop_assert!((a - b).abs() < 1e-4, "{} vs {}", a, b);
    }
}
