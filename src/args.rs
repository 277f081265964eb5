use clap::Parser;

/// This is the scoring program for the voter-type quiz.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the scoring run: quiz content, sources of answers
    /// and output. See the manual of the voter_type crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The quiz content in JSON format. If not provided, the bundled quiz is used.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub quiz: Option<String>,

    /// (list of question=letter pairs) A single set of answers, for example q1=A,q2=C.
    /// The flag may be repeated.
    #[clap(short, long, value_parser, value_delimiter = ',')]
    pub answers: Option<Vec<String>>,

    /// (file path or empty) A file containing many sets of answers. Setting this option overrides the
    /// sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (json, csv or xlsx) The type of the input. Guessed from the extension of the input file if missing.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default id) The column holding the identifier of each set of answers in csv and xlsx inputs.
    #[clap(long, value_parser)]
    pub id_column: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, votertype will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (result type, case insensitive) Prints the content of the result card for this result type
    /// instead of scoring answers.
    #[clap(long, value_parser)]
    pub result: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
