//! Autodiff graph node for the bilinear sampler.

use burn::backend::autodiff::{
    checkpoint::{base::Checkpointer, strategy::CheckpointStrategy},
    grads::Gradients,
    ops::{Backward, Ops, OpsKind},
    Autodiff, NodeID,
};
use burn::tensor::ops::FloatTensor;

use super::backend::SamplerBackend;

/// Backward step of a bilinear sample with parents `[x, grid]`.
#[derive(Debug)]
struct BilinearSampleBackward;

impl<B: SamplerBackend> Backward<B, 2> for BilinearSampleBackward {
    type State = (NodeID, NodeID);

    fn backward(
        self,
        ops: Ops<Self::State, 2>,
        grads: &mut Gradients,
        checkpointer: &mut Checkpointer,
    ) {
        let [node_x, node_grid] = ops.parents;
        let grad_output = grads.consume::<B>(&ops.node);

        let (x_state, grid_state) = ops.state;
        let x: FloatTensor<B> = checkpointer.retrieve_node_output(x_state);
        let grid: FloatTensor<B> = checkpointer.retrieve_node_output(grid_state);

        let (grad_x, grad_grid) = B::bilinear_sample_backward(x, grid, grad_output);

        if let Some(node) = node_x {
            grads.register::<B>(node.id, grad_x);
        }
        if let Some(node) = node_grid {
            grads.register::<B>(node.id, grad_grid);
        }
    }
}

impl<B: SamplerBackend, C: CheckpointStrategy> SamplerBackend for Autodiff<B, C> {
    fn bilinear_sample(x: FloatTensor<Self>, grid: FloatTensor<Self>) -> FloatTensor<Self> {
        match BilinearSampleBackward
            .prepare::<C>([x.node.clone(), grid.node.clone()])
            .compute_bound()
            .stateful()
        {
            OpsKind::Tracked(mut prep) => {
                let x_state = prep.checkpoint(&x);
                let grid_state = prep.checkpoint(&grid);
                let output = B::bilinear_sample(x.primitive, grid.primitive);

                prep.finish((x_state, grid_state), output)
            }
            OpsKind::UnTracked(prep) => {
                let output = B::bilinear_sample(x.primitive, grid.primitive);
                prep.finish(output)
            }
        }
    }
}
