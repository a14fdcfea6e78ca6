#![cfg(feature = "wgpu")]

use burn::backend::Wgpu;
use burn::tensor::{Tensor, TensorData};
use burn_ndarray::NdArray;
use depthwarp_core::{sample, sample_backward};

#[test]
fn test_wgpu_matches_ndarray() {
    let cpu = Default::default();
    let gpu = Default::default();

    let dims = [2, 3, 6, 7];
    let data: Vec<f32> = (0..252).map(|i| ((i * 13) % 29) as f32 * 0.1).collect();
    let grid_data: Vec<f32> = (0..2 * 2 * 4 * 5).map(|i| ((i * 17) % 41) as f32 * 0.173 - 0.5).collect();
    let grad_data: Vec<f32> = (0..2 * 3 * 4 * 5).map(|i| 1.0 + (i % 5) as f32).collect();

    let run_cpu = {
        let x = Tensor::<NdArray<f32>, 4>::from_data(TensorData::new(data.clone(), dims), &cpu);
        let grid = Tensor::<NdArray<f32>, 4>::from_data(TensorData::new(grid_data.clone(), [2, 2, 4, 5]), &cpu);
        let grad = Tensor::<NdArray<f32>, 4>::from_data(TensorData::new(grad_data.clone(), [2, 3, 4, 5]), &cpu);
        let out = sample(x.clone(), grid.clone()).unwrap();
        let (_, grad_grid) = sample_backward(x, grid, grad).unwrap();
        (out.into_data().to_vec::<f32>().unwrap(), grad_grid.into_data().to_vec::<f32>().unwrap())
    };

    let run_gpu = {
        let x = Tensor::<Wgpu, 4>::from_data(TensorData::new(data, dims), &gpu);
        let grid = Tensor::<Wgpu, 4>::from_data(TensorData::new(grid_data, [2, 2, 4, 5]), &gpu);
        let grad = Tensor::<Wgpu, 4>::from_data(TensorData::new(grad_data, [2, 3, 4, 5]), &gpu);
        let out = sample(x.clone(), grid.clone()).unwrap();
        let (_, grad_grid) = sample_backward(x, grid, grad).unwrap();
        (out.into_data().to_vec::<f32>().unwrap(), grad_grid.into_data().to_vec::<f32>().unwrap())
    };

    for (a, b) in run_cpu.0.iter().zip(run_gpu.0.iter()) {
        assert!((a - b).abs() < 1e-4, "forward: {} vs {}", a, b);
    }
    for (a, b) in run_cpu.1.iter().zip(run_gpu.1.iter()) {
        assert!((a - b).abs() < 1e-3, "backward: {} vs {}", a, b);
    }
}
