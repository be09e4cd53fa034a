fn main() {
    space_escape::game::run();
}
