//! Property tests comparing `Vector` with `Vec` as a model.

use proptest::prelude::*;
use rawvec::Vector;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Erase(usize),
    Reserve(usize),
    Resize(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        any::<usize>().prop_map(Op::Erase),
        (0usize..64).prop_map(Op::Reserve),
        (0usize..64).prop_map(Op::Resize),
    ]
}

proptest! {
    #[test]
    fn pushes_are_kept_in_order(values in prop::collection::vec(any::<i64>(), 0..200)) {
        let mut vec = Vector::new();
        for v in &values {
            vec.push_back(*v);
        }
        prop_assert_eq!(vec.len(), values.len());
        prop_assert_eq!(vec.as_slice(), values.as_slice());
    }

    #[test]
    fn resize_sets_len_and_default_fills(
        start in prop::collection::vec(1u8..=255, 0..32),
        new_len in 0usize..64,
    ) {
        let mut vec: Vector<u8> = start.iter().copied().collect();
        vec.resize(new_len);

        prop_assert_eq!(vec.len(), new_len);
        let kept = start.len().min(new_len);
        prop_assert_eq!(&vec[..kept], &start[..kept]);
        prop_assert!(vec[kept..].iter().all(|v| *v == 0));
    }

    #[test]
    fn reserve_is_monotonic(
        start in prop::collection::vec(any::<i32>(), 0..32),
        requests in prop::collection::vec(0usize..128, 1..8),
    ) {
        let mut vec: Vector<i32> = start.iter().copied().collect();
        for n in requests {
            let before = vec.capacity();
            vec.reserve(n);
            prop_assert_eq!(vec.capacity(), before.max(n));
            prop_assert_eq!(vec.as_slice(), start.as_slice());
        }
    }

    #[test]
    fn insert_then_read_back(
        start in prop::collection::vec(any::<i32>(), 0..32),
        pos in any::<prop::sample::Index>(),
        value in any::<i32>(),
    ) {
        let mut vec: Vector<i32> = start.iter().copied().collect();
        let pos = pos.index(start.len() + 1);

        prop_assert_eq!(vec.insert(pos, value), pos);
        prop_assert_eq!(vec.len(), start.len() + 1);
        prop_assert_eq!(vec[pos], value);
        prop_assert_eq!(&vec[..pos], &start[..pos]);
        prop_assert_eq!(&vec[pos + 1..], &start[pos..]);
    }

    #[test]
    fn erase_removes_one(
        start in prop::collection::vec(any::<i32>(), 1..32),
        pos in any::<prop::sample::Index>(),
    ) {
        let mut vec: Vector<i32> = start.iter().copied().collect();
        let pos = pos.index(start.len());

        prop_assert_eq!(vec.erase(pos), pos);
        prop_assert_eq!(vec.len(), start.len() - 1);
        prop_assert_eq!(&vec[..pos], &start[..pos]);
        prop_assert_eq!(&vec[pos..], &start[pos + 1..]);
    }

    #[test]
    fn clone_is_equal_and_independent(start in prop::collection::vec(any::<i32>(), 0..32)) {
        let source: Vector<i32> = start.iter().copied().collect();
        let mut copy = source.clone();
        prop_assert_eq!(copy.as_slice(), source.as_slice());

        copy.push_back(0);
        for v in copy.iter_mut() {
            *v = v.wrapping_add(1);
        }
        prop_assert_eq!(source.as_slice(), start.as_slice());
    }

    #[test]
    fn matches_vec_model(ops in prop::collection::vec(arb_op(), 0..100)) {
        let mut vec: Vector<i32> = Vector::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    vec.push_back(v);
                    model.push(v);
                }
                Op::Pop => {
                    prop_assert_eq!(vec.pop_back(), model.pop());
                }
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    vec.insert(i, v);
                    model.insert(i, v);
                }
                Op::Erase(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        vec.erase(i);
                        model.remove(i);
                    }
                }
                Op::Reserve(n) => vec.reserve(n),
                Op::Resize(n) => {
                    vec.resize(n);
                    model.resize(n, 0);
                }
            }
            prop_assert!(vec.len() <= vec.capacity());
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }
}
