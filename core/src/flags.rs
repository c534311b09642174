bitflags::bitflags! {
    /// Flags tweaking what the parser accepts, mirroring the host compiler
    /// flags that are relevant at the syntax level.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ParserFlags: u32 {
        /// Do not emit the implicit trailing DEDENTs in interactive mode.
        const DONT_IMPLY_DEDENT = 0x0002;
        /// Skip the source-encoding declaration line. Accepted for
        /// compatibility; input is already decoded text.
        const IGNORE_COOKIE = 0x0010;
        /// Accept `<>` for not-equal and reject `!=`.
        const BARRY_AS_BDFL = 0x0020;
        /// Parse and preserve `# type:` comments.
        const TYPE_COMMENTS = 0x0040;
        /// Report end-of-input mid-construct as incomplete input rather
        /// than a plain syntax error.
        const ALLOW_INCOMPLETE_INPUT = 0x0100;
    }
}
