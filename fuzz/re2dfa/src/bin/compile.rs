use fuzz_re2dfa::Input;

fn main() {
    afl::fuzz!(|data: Input| data.run());
}
