fn main() {
    let (config, scene) = trigon_demos::scenes::triangles();
    trigon_demos::run(config, scene);
}
