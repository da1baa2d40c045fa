fn main() {
    let (config, scene) = trigon_demos::scenes::hello_window();
    trigon_demos::run(config, scene);
}
