const TITLE: &str = "Instructions and Disclaimer";

const BODY: &str = "\
NOTE: Use this tool at your own risk.
We do not guarantee that using this tool will cause you to avoid errors on an
assignment. We make no guarantees that what is found by this tool will
encompass all possible style issues in the input code, so make sure to give
your code a second look yourself.";

const USAGE: &str = "\
Type or paste Java source; every line you enter is added to the editor.
Commands:
  :check         submit the current source
  :show          print the editor contents
  :load PATH     replace the editor contents with a file
  :clear         empty the editor
  :theme NAME    switch the highlight theme (:themes lists them)
  :tab N         set the tab size sent with wrapped requests
  :font N        set the editor font size
  :dismiss       close the current results
  :help          open or close this dialog
  :quit          leave
Start a line with :: to enter a literal leading colon.";

/// Static help dialog with an open/closed flag
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HelpModal {
    open: bool,
}

impl HelpModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Dialog text, independent of the open flag
    pub fn render() -> String {
        let rule = "-".repeat(TITLE.len());
        format!("{}\n{}\n{}", TITLE, rule, BODY)
    }

    /// Dialog text followed by the interactive command reference
    pub fn render_with_usage() -> String {
        format!("{}\n\n{}", Self::render(), USAGE)
    }
}
