fn main() {
    let (config, scene) = trigon_demos::scenes::hello_triangle();
    trigon_demos::run(config, scene);
}
