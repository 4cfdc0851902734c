use criterion::Criterion;
use light_curve_transit::ndarray::{Array1, Array2};
use light_curve_transit::{LdLaw, LdModel, LdModelTrait, ParametricLdModel, SampledLdModel};
use light_curve_transit_test_util::TESS_KEPLER_PROFILE_LIBRARY;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

pub fn bench_ld_model(c: &mut Criterion) {
    let mu = Array1::linspace(0.0, 1.0, 100);
    let models: [(&str, LdModel, usize); 3] = [
        (
            "quadratic",
            ParametricLdModel::new(LdLaw::Quadratic, 2).into(),
            4,
        ),
        (
            "sampled",
            SampledLdModel::from_library(TESS_KEPLER_PROFILE_LIBRARY.clone(), false).into(),
            0,
        ),
        (
            "sampled frozen",
            SampledLdModel::from_library(TESS_KEPLER_PROFILE_LIBRARY.clone(), true).into(),
            0,
        ),
    ];
    let mut rng = StdRng::seed_from_u64(0);

    for n_vectors in [1, 100] {
        for (name, model, n_parameters) in models.iter() {
            let pv = Array2::from_elem((n_vectors, *n_parameters), 0.3);
            c.bench_function(
                format!("LdModel {name}: {n_vectors} parameter vectors").as_str(),
                |b| {
                    b.iter(|| {
                        black_box(
                            model
                                .evaluate_with_rng(mu.view(), pv.view(), &mut rng)
                                .unwrap(),
                        );
                    })
                },
            );
        }
    }
}
