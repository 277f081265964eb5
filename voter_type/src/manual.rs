/*!

This is the long-form manual for `voter_type` and `votertype`.

## Scoring

The quiz has nine questions, `q1` to `q9`, each with four options `A` to `D`.
Every option credits zero, one or two result types:

| question | A | B | C | D |
|----------|---|---|---|---|
| q1 | ProcessPro | InfoDetective | LastMinuteSprinter, ConfusionCute | ConfusionCute |
| q2 | ProcessPro, PhoneFreeHero | InfoDetective | QueueZen, PosterNostalgic2 | ConfusionCute, LastMinuteSprinter |
| q3 | ProcessPro, QueueZen | QueueZen | LastMinuteSprinter | ConfusionCute |
| q4 | ProcessPro, PhoneFreeHero | ConfusionCute | LastMinuteSprinter | ConfusionCute |
| q5 | ProcessPro | QueueZen | ConfusionCute | LastMinuteSprinter, ConfusionCute |
| q6 | SealSniper, ProcessPro | SealSniper, QueueZen | ProcessPro | LastMinuteSprinter, QueueZen |
| q7 | ProcessPro, SealSniper | ConfusionCute | ConfusionCute, PosterNostalgic2 | LastMinuteSprinter |
| q8 | QueueZen, ProcessPro | PosterNostalgic2 | InfoDetective | ProcessPro, InfoDetective |
| q9 | ProcessPro, QueueZen | LastMinuteSprinter, ConfusionCute | InfoDetective | PhoneFreeHero, QueueZen |

Questions `q4`, `q5` and `q6` weigh 2, all the others weigh 1.

The winner is the result type with the highest total. If several result types
share the highest total, the one with the most credits from `q5` and `q6` wins.
If that is still a tie, the credits from `q4` decide. Any remaining tie goes to
the result type listed first in this order:

1. `ProcessPro`
2. `QueueZen`
3. `ConfusionCute`
4. `SealSniper`
5. `PhoneFreeHero`
6. `InfoDetective`
7. `PosterNostalgic2`
8. `LastMinuteSprinter`

Answers to unknown questions, and letters other than `A`, `B`, `C`, `D`, are
ignored. When the quiz content is known, a missing answer to one of its
questions stops the scoring.

## Command line

The `votertype` program scores one or many answer sets.

```bash
votertype --answers q1=A,q2=B,q3=A,q4=C,q5=A,q6=B,q7=A,q8=D,q9=A
```

Without `--quiz`, the bundled quiz content is used to know which questions
must be answered.

### Input formats

The `--input` flag reads many answer sets at once. The `--input-type` flag
selects the format (by default it is guessed from the file extension):

* `json` a single object such as `{"q1": "A", "q2": "B"}`, or a list of them.
  Each element of a list may also be `{"id": "alice", "answers": {...}}`.
* `csv` a header row with the question ids. A column called `id` (see
  `idColumn`) names each answer set.
* `xlsx` the same layout as `csv`, in an Excel worksheet. Exports from
  Microsoft Forms and Google Forms can be used once the question columns are
  renamed to `q1`...`q9`.

### Output

The summary is written in JSON format to the path given by `--out`, or to the
standard output:

```text
{
  "config": { "quiz": "...", "responses": 1, "run": "..." },
  "distribution": { "ProcessPro": 1, ... },
  "results": [
    {
      "id": "cli",
      "ranking": ["ProcessPro", ...],
      "scores": { "q4": {...}, "q5q6": {...}, "total": {...} },
      "winner": "ProcessPro"
    }
  ]
}
```

With `--reference`, the summary is compared to a previously computed one and
the differences are displayed.

### Configuration

The `--config` flag takes a JSON file describing a run:

```text
{
  "outputSettings": { "runName": "classroom", "outputPath": "summary.json" },
  "quizPath": "quiz.json",
  "responseSources": [
    { "provider": "csv", "filePath": "responses.csv", "idColumn": "student" }
  ]
}
```

Paths are relative to the directory of the configuration file. Flags given on
the command line take precedence.

### Result cards

`votertype --result queuezen` prints the content of a result card: titles,
caption to share, accent color and illustration.

*/
