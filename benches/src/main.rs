use std::{hint::black_box, time::Instant};

use clap::Parser;
use linear_bvh::{
    geometry::{Geometry, GeometryCollection, Triangle},
    Blas, Hittable, Matrix4, Point3, Ray, Tlas, Vector3,
};
use rand::{rng, rngs::ThreadRng, Rng};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    rays: usize,
    #[arg(long)]
    samples: usize,
}

fn random_offset(rng: &mut ThreadRng) -> Vector3 {
    Vector3::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    )
}

/// Fills every group of every instance with small random triangles.
fn random_instances(rng: &mut ThreadRng) -> Vec<(Vec<GeometryCollection>, Matrix4)> {
    (0..Tlas::LEAF_CAPACITY)
        .map(|_| {
            let groups = (0..Blas::LEAF_CAPACITY)
                .map(|_| {
                    (0..GeometryCollection::CAPACITY)
                        .map(|_| {
                            let center = Point3::new(
                                rng.random_range(-10.0..=10.0),
                                rng.random_range(-10.0..=10.0),
                                rng.random_range(-10.0..=10.0),
                            );
                            Geometry::Triangle(Triangle::new(
                                center + random_offset(rng),
                                center + random_offset(rng),
                                center + random_offset(rng),
                            ))
                        })
                        .collect()
                })
                .collect();
            let model = Matrix4::new_translation(&(random_offset(rng) * 100.0));
            (groups, model)
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();
    let mut rng = rng();

    let mut samples = Vec::new();
    let mut rays = Vec::new();

    for i in 0..cli.samples {
        rays.clear();
        for _ in 0..cli.rays {
            rays.push(Ray::new(
                Point3::from(random_offset(&mut rng)),
                random_offset(&mut rng),
            ));
        }
        let instances = random_instances(&mut rng);

        let mut brute_force_duration = f64::NAN;
        let mut bvh_duration = f64::NAN;

        let mut measure_brute_force = |instances: &[(Vec<GeometryCollection>, Matrix4)]| {
            let start_brute_force = Instant::now();
            for ray in &rays {
                black_box(
                    black_box(instances)
                        .iter()
                        .filter_map(|(groups, model)| {
                            let inverse = model.try_inverse()?;
                            let local_ray = ray.transformed(&inverse);
                            groups
                                .iter()
                                .filter_map(|group| group.intersection(&local_ray, 0.001, 1e6))
                                .map(|hit| hit.distance)
                                .reduce(f32::min)
                        })
                        .reduce(f32::min),
                );
            }
            brute_force_duration = start_brute_force.elapsed().as_secs_f64();
        };

        let mut measure_bvh = |instances: &[(Vec<GeometryCollection>, Matrix4)]| {
            let start_bvh = Instant::now();
            let mut tlas = Tlas::new();
            for (groups, model) in black_box(instances) {
                let mut blas = Blas::new();
                for group in groups {
                    blas.insert(group.clone());
                }
                if tlas.insert_instance(blas, *model).is_err() {
                    return;
                }
            }
            for ray in &rays {
                black_box(tlas.intersection(black_box(ray), 0.001, 1e6));
            }
            bvh_duration = start_bvh.elapsed().as_secs_f64();
        };

        // Flip order to minimize bias due to caching.
        if i % 2 == 0 {
            measure_bvh(&instances);
            measure_brute_force(&instances);
        } else {
            measure_brute_force(&instances);
            measure_bvh(&instances);
        }

        let bvh_speedup = brute_force_duration / bvh_duration;
        samples.push(bvh_speedup);
    }

    samples.sort_by(|a, b| a.total_cmp(b));

    // Median.
    println!("{}", samples[cli.samples / 2]);
}
