use crate::bvh::BvhLinearTree;
use crate::linear::{write_matrix, write_record, Linearize, MATRIX_SIZE, NODE_RECORD_SIZE};

/// Layout: the ray transform, then every slot in index order, then one record per
/// content slot. Unused content slots hold the content type's empty record, so the
/// size only depends on `N` and the content type.
impl<C: Linearize, const N: usize> Linearize for BvhLinearTree<C, N> {
    const LINEAR_SIZE: usize = MATRIX_SIZE
        + Self::NODE_CAPACITY * NODE_RECORD_SIZE
        + Self::LEAF_CAPACITY * C::LINEAR_SIZE;

    fn linearize_into(&self, buffer: &mut Vec<u8>) {
        write_matrix(buffer, &self.transform);
        for node in &self.nodes {
            write_record(buffer, &node.to_gpu());
        }
        for content in self.contents.iter() {
            content.linearize_into(buffer);
        }
        for _ in self.len()..Self::LEAF_CAPACITY {
            C::linearize_empty_into(buffer);
        }
    }

    fn linearize_empty_into(buffer: &mut Vec<u8>) {
        Self::new().linearize_into(buffer);
    }
}
